//! Offline markdown helpers backed by [`scribe::editor`].

use std::path::Path;

use anyhow::{Context as _, Result};
use scribe::api::Upload;
use scribe::editor::{Editor, ImageFile, ToolbarAction, strip_html};

use super::FormatArgs;
use crate::notify;

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn write(path: &Path, text: &str) -> Result<()> {
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub async fn preview(path: &Path, text: bool) -> Result<()> {
    let html = Editor::new(read(path).await?).preview();
    if text {
        println!("{}", strip_html(&html));
    } else {
        println!("{html}");
    }
    Ok(())
}

pub async fn format(args: FormatArgs) -> Result<()> {
    let action = ToolbarAction::from(args.action);
    let mut editor = Editor::new(read(&args.file).await?);
    editor.select(args.from..args.to.unwrap_or(args.from));
    editor.apply(action);
    write(&args.file, editor.text()).await?;
    notify::success(format!("Applied {}", action.label()));
    Ok(())
}

pub async fn embed_image(path: &Path, image: &Path, at: Option<usize>) -> Result<()> {
    let upload = Upload::from_path(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let image = ImageFile::new(upload)?;

    let mut editor = Editor::new(read(path).await?);
    if let Some(at) = at {
        editor.set_cursor(at);
    }
    editor.insert_image(&image);
    write(path, editor.text()).await?;
    notify::success(format!("Embedded {}", image.name()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionArg;

    #[tokio::test]
    async fn format_rewrites_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("post.md");
        std::fs::write(&file, "make this loud").unwrap();

        format(FormatArgs {
            file: file.clone(),
            action: ActionArg::Bold,
            from: 10,
            to: Some(14),
        })
        .await
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "make this **loud**"
        );
    }

    #[tokio::test]
    async fn embed_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("post.md");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&file, "").unwrap();
        std::fs::write(&notes, "hello").unwrap();

        let err = embed_image(&file, &notes, None).await.unwrap_err();
        assert!(err.to_string().contains("valid image file"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "");
    }
}
