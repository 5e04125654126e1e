use std::path::Path;

use anyhow::{Context as _, Result};
use scribe::api::{PostFilters, PostUpdate};
use scribe::forms::{PostForm, parse_tag_input};
use scribe::guards::Guard;

use super::{PostFields, PostListArgs, PostsCommand, upload_opt};
use crate::context::Context;
use crate::notify::{self, outcome};
use crate::render;

pub async fn run(ctx: &Context, command: PostsCommand) -> Result<()> {
    match command {
        PostsCommand::List(args) => list(ctx, args).await,
        PostsCommand::Show { id } => show(ctx, &id).await,
        PostsCommand::Create(fields) => create(ctx, fields).await,
        PostsCommand::Edit { id, fields } => edit(ctx, &id, fields).await,
        PostsCommand::Delete { id } => delete(ctx, &id).await,
        PostsCommand::Like { id } => like(ctx, &id).await,
        PostsCommand::Drafts(page) => {
            ctx.require(Guard::Authenticated).await?;
            let drafts = outcome(
                ctx.client.posts().drafts(page.query()).await,
                "Failed to load drafts",
            )?;
            println!("{}", render::page(&drafts, render::post_line));
            Ok(())
        }
    }
}

fn filters(args: PostListArgs) -> PostFilters {
    PostFilters {
        search: args.search,
        tag: args.tag,
        author: args.author,
        status: args.status.map(Into::into),
        sort_by: args.sort_by,
        page: args.page,
        limit: args.limit,
    }
}

async fn list(ctx: &Context, args: PostListArgs) -> Result<()> {
    let page = outcome(
        ctx.client.posts().list(&filters(args)).await,
        "Failed to load posts",
    )?;
    println!("{}", render::page(&page, render::post_line));
    Ok(())
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let post = outcome(ctx.client.posts().get(id).await, "Failed to load post")?;
    print!("{}", render::post_detail(&post));
    Ok(())
}

async fn read_markdown(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn create(ctx: &Context, fields: PostFields) -> Result<()> {
    ctx.require(Guard::Authenticated).await?;
    let content = match &fields.content {
        Some(path) => read_markdown(path).await?,
        None => String::new(),
    };
    let cover_image = outcome(
        upload_opt(fields.cover_image.as_ref()).await,
        "Failed to create post",
    )?;
    let form = PostForm {
        title: fields.title.unwrap_or_default(),
        content,
        excerpt: fields.excerpt.unwrap_or_default(),
        tags: fields.tags.as_deref().map(parse_tag_input).unwrap_or_default(),
        status: fields.status.map(Into::into).unwrap_or_default(),
        cover_image,
    };
    let new_post = outcome(form.into_new_post().map_err(Into::into), "Failed to create post")?;
    let post = outcome(ctx.client.posts().create(&new_post).await, "Failed to create post")?;
    notify::success(if post.is_published() {
        "Post published successfully"
    } else {
        "Draft saved successfully"
    });
    println!("{}", render::post_line(&post));
    Ok(())
}

async fn edit(ctx: &Context, id: &str, fields: PostFields) -> Result<()> {
    ctx.require(Guard::Authenticated).await?;
    let content = match &fields.content {
        Some(path) => Some(read_markdown(path).await?),
        None => None,
    };
    let cover_image = outcome(
        upload_opt(fields.cover_image.as_ref()).await,
        "Failed to update post",
    )?;
    let update = PostUpdate {
        title: fields.title,
        content,
        excerpt: fields.excerpt,
        cover_image,
        tags: fields.tags.as_deref().map(parse_tag_input),
        status: fields.status.map(Into::into),
    };
    let post = outcome(ctx.client.posts().update(id, &update).await, "Failed to update post")?;
    notify::success("Post updated successfully");
    println!("{}", render::post_line(&post));
    Ok(())
}

async fn delete(ctx: &Context, id: &str) -> Result<()> {
    ctx.require(Guard::Authenticated).await?;
    let message = outcome(ctx.client.posts().delete(id).await, "Failed to delete post")?;
    notify::acknowledged(message, "Post deleted successfully");
    Ok(())
}

async fn like(ctx: &Context, id: &str) -> Result<()> {
    let state = ctx.require(Guard::Authenticated).await?;
    let likes = outcome(ctx.client.posts().toggle_like(id).await, "Failed to like post")?;
    let liked = state
        .user
        .as_ref()
        .is_some_and(|user| likes.is_liked_by(&user.id));
    notify::success(format!(
        "{} ({} likes)",
        if liked { "Liked" } else { "Unliked" },
        likes.like_count
    ));
    Ok(())
}
