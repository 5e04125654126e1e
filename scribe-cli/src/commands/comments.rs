use anyhow::Result;
use scribe::api::CommentQuery;
use scribe::forms::CommentForm;
use scribe::guards::Guard;

use super::{CommentsCommand, ListArgs, uploads};
use crate::context::Context;
use crate::notify::{self, outcome};
use crate::render;

pub async fn run(ctx: &Context, command: CommentsCommand) -> Result<()> {
    match command {
        CommentsCommand::List {
            post_id,
            parent,
            page,
        } => list(ctx, &post_id, parent, &page).await,
        CommentsCommand::Add {
            post_id,
            content,
            reply_to,
            images,
        } => {
            ctx.require(Guard::Authenticated).await?;
            let form = CommentForm {
                content,
                images: outcome(uploads(&images).await, "Failed to add comment")?,
            };
            let comment = outcome(
                form.into_new_comment(post_id, reply_to).map_err(Into::into),
                "Failed to add comment",
            )?;
            let created = outcome(
                ctx.client.comments().create(&comment).await,
                "Failed to add comment",
            )?;
            notify::success(if created.is_root() {
                "Comment added successfully"
            } else {
                "Reply added successfully"
            });
            print!("{}", render::comment_tree(std::slice::from_ref(&created)));
            Ok(())
        }
        CommentsCommand::Edit {
            id,
            content,
            images,
        } => {
            ctx.require(Guard::Authenticated).await?;
            let form = CommentForm {
                content,
                images: outcome(uploads(&images).await, "Failed to update comment")?,
            };
            let update = outcome(
                form.into_update().map_err(Into::into),
                "Failed to update comment",
            )?;
            let updated = outcome(
                ctx.client.comments().update(&id, &update).await,
                "Failed to update comment",
            )?;
            notify::success("Comment updated successfully");
            print!("{}", render::comment_tree(std::slice::from_ref(&updated)));
            Ok(())
        }
        CommentsCommand::Delete { id } => {
            ctx.require(Guard::Authenticated).await?;
            let message = outcome(
                ctx.client.comments().delete(&id).await,
                "Failed to delete comment",
            )?;
            notify::acknowledged(message, "Comment deleted successfully");
            Ok(())
        }
        CommentsCommand::Like { id } => {
            let state = ctx.require(Guard::Authenticated).await?;
            let likes = outcome(
                ctx.client.comments().toggle_like(&id).await,
                "Failed to like comment",
            )?;
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
    }
}

async fn list(ctx: &Context, post_id: &str, parent: Option<String>, page: &ListArgs) -> Result<()> {
    let mut query = CommentQuery::for_post(post_id).page(page.page, page.limit);
    if let Some(parent) = parent {
        query = query.replies_to(parent);
    }
    let comments = outcome(
        ctx.client.comments().list(&query).await,
        "Failed to load comments",
    )?;
    if comments.items.is_empty() {
        println!("No comments yet.");
    } else {
        print!("{}", render::comment_tree(&comments.items));
    }
    println!("{}", render::page_footer(&comments));
    Ok(())
}
