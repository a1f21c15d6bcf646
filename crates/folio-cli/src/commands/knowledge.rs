use anyhow::{Result, bail};
use colored::Colorize;
use folio_application::AssistantService;
use folio_core::error::FolioError;
use folio_core::knowledge::{Category, KnowledgeBase, KnowledgeRepository};
use folio_infrastructure::{ConfigService, FolioPaths, TomlKnowledgeRepository};
use std::path::PathBuf;

/// Writes the builtin content as an editable knowledge file.
pub async fn export(paths: &FolioPaths, out: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match out {
        Some(path) => path,
        None => paths.knowledge_file()?,
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let repo = TomlKnowledgeRepository::with_path(path);
    repo.save(&KnowledgeBase::builtin().to_content()).await?;
    println!(
        "{}",
        format!("Knowledge written to {}", repo.path().display()).bright_green()
    );
    println!(
        "{}",
        "Point [knowledge] path at this file in config.toml to use it.".bright_black()
    );
    Ok(())
}

/// Prints a category section, or a single record when `query` is non-empty.
pub async fn show(config_service: &ConfigService, category: &str, query: &str) -> Result<()> {
    let service = AssistantService::bootstrap(config_service).await?;
    let category = Category::from_key(category)
        .ok_or_else(|| FolioError::UnknownCategory(category.to_string()))?;
    let kb = service.knowledge();

    if query.trim().is_empty() {
        let section = kb.resolve_section(category);
        println!("{}", section.label.bright_magenta().bold());
        println!("{}", section.content);
    } else {
        let lookup = kb.lookup_detail(category, query);
        let text = lookup.render(kb.owner_name());
        if lookup.is_found() {
            println!("{}", text);
        } else {
            println!("{}", text.yellow());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let paths = FolioPaths::new(Some(dir.path().to_path_buf()));
        let out = dir.path().join("kb.toml");

        export(&paths, Some(out.clone()), false).await.unwrap();
        let kb = TomlKnowledgeRepository::with_path(out.clone())
            .load()
            .await
            .unwrap();
        assert_eq!(kb.owner_name(), KnowledgeBase::builtin().owner_name());

        assert!(export(&paths, Some(out.clone()), false).await.is_err());
        export(&paths, Some(out), true).await.unwrap();
    }

    #[tokio::test]
    async fn test_export_defaults_to_config_dir() {
        let dir = TempDir::new().unwrap();
        let paths = FolioPaths::new(Some(dir.path().to_path_buf()));
        export(&paths, None, false).await.unwrap();
        assert!(paths.knowledge_file().unwrap().exists());
    }
}
