use anyhow::Result;
use scribe::guards::Guard;

use super::AdminCommand;
use crate::context::Context;
use crate::notify::{self, outcome};
use crate::render;

/// Every admin command requires the admin role.
pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    ctx.require(Guard::Admin).await?;
    let admin = ctx.client.admin();

    match command {
        AdminCommand::Dashboard => {
            let dashboard = outcome(admin.dashboard().await, "Failed to load dashboard")?;
            print!("{}", render::dashboard(&dashboard));
        }
        AdminCommand::Users(page) => {
            let users = outcome(admin.users(page.query()).await, "Failed to load users")?;
            println!("{}", render::page(&users, render::user_line));
        }
        AdminCommand::SetRole { user_id, role } => {
            let user = outcome(
                admin.update_user_role(&user_id, role.into()).await,
                "Failed to update user role",
            )?;
            notify::success(format!("{} is now {}", user.name, user.role));
        }
        AdminCommand::DeleteUser { user_id } => {
            let message = outcome(admin.delete_user(&user_id).await, "Failed to delete user")?;
            notify::acknowledged(message, "User deleted successfully");
        }
        AdminCommand::Posts(page) => {
            let posts = outcome(admin.posts(page.query()).await, "Failed to load posts")?;
            println!("{}", render::page(&posts, render::post_line));
        }
        AdminCommand::Comments(page) => {
            let comments = outcome(admin.comments(page.query()).await, "Failed to load comments")?;
            print!("{}", render::comment_tree(&comments.items));
            println!("{}", render::page_footer(&comments));
        }
    }
    Ok(())
}
