use anyhow::Result;
use scribe::api::ProfileUpdate;
use scribe::forms::{
    ForgotPasswordForm, PasswordChangeForm, ProfileForm, RegisterForm, ResetPasswordForm,
};
use scribe::guards::Guard;

use super::{ProfileArgs, RegisterArgs, upload_opt};
use crate::context::Context;
use crate::notify::{self, outcome};
use crate::render;

fn prompt(label: &str) -> Result<String> {
    Ok(rpassword::prompt_password(format!("{label}: "))?)
}

pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let user = outcome(ctx.client.auth().login(email, &password).await, "Login failed")?;
    notify::success(format!("Welcome back, {}!", user.name));
    Ok(())
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let avatar = outcome(upload_opt(args.avatar.as_ref()).await, "Registration failed")?;
    let form = RegisterForm {
        name: args.name,
        email: args.email,
        password: prompt("Password")?,
        confirm_password: prompt("Confirm password")?,
        avatar,
    };
    match outcome(ctx.client.auth().register(&form).await, "Registration failed")? {
        Some(user) if ctx.client.store().is_authenticated().await => {
            notify::success(format!("Welcome, {}!", user.name));
        }
        _ => notify::success("Registration successful. You can now log in."),
    }
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    outcome(ctx.client.auth().logout().await, "Logout failed")?;
    notify::success("Logged out successfully");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    ctx.require(Guard::Authenticated).await?;
    let user = outcome(ctx.client.users().get_profile().await, "Failed to load profile")?;
    println!("{}", render::user_line(&user));
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{bio}");
    }
    Ok(())
}

pub async fn update_profile(ctx: &Context, args: ProfileArgs) -> Result<()> {
    let state = ctx.require(Guard::Authenticated).await?;
    let avatar = outcome(upload_opt(args.avatar.as_ref()).await, "Failed to update profile")?;

    // Unset fields keep their current value.
    let update = match state.user {
        Some(current) => {
            let form = ProfileForm {
                name: args.name.unwrap_or(current.name),
                email: args.email.unwrap_or(current.email),
                bio: args.bio.or(current.bio).unwrap_or_default(),
                avatar,
            };
            outcome(
                form.into_update().map_err(Into::into),
                "Failed to update profile",
            )?
        }
        None => ProfileUpdate {
            name: args.name,
            email: args.email,
            bio: args.bio,
            avatar,
        },
    };
    let user = outcome(
        ctx.client.users().update_profile(&update).await,
        "Failed to update profile",
    )?;
    notify::success("Profile updated successfully");
    println!("{}", render::user_line(&user));
    Ok(())
}

pub async fn change_password(ctx: &Context) -> Result<()> {
    ctx.require(Guard::Authenticated).await?;
    let form = PasswordChangeForm {
        current_password: prompt("Current password")?,
        new_password: prompt("New password")?,
        confirm_password: prompt("Confirm new password")?,
    };
    let message = outcome(
        ctx.client.users().update_password(&form).await,
        "Failed to update password",
    )?;
    notify::acknowledged(message, "Password updated successfully");
    Ok(())
}

pub async fn refresh(ctx: &Context) -> Result<()> {
    outcome(
        ctx.client.auth().refresh_session().await,
        "Session refresh failed",
    )?;
    notify::success("Session refreshed");
    Ok(())
}

pub async fn forgot_password(ctx: &Context, email: &str) -> Result<()> {
    let form = ForgotPasswordForm {
        email: email.to_string(),
    };
    let message = outcome(
        ctx.client.auth().forgot_password(&form).await,
        "Failed to send reset email",
    )?;
    notify::acknowledged(message, "Password reset email sent");
    Ok(())
}

pub async fn reset_password(ctx: &Context, token: &str) -> Result<()> {
    let form = ResetPasswordForm {
        password: prompt("New password")?,
        confirm_password: prompt("Confirm new password")?,
    };
    let message = outcome(
        ctx.client.auth().reset_password(token, &form).await,
        "Failed to reset password",
    )?;
    notify::acknowledged(message, "Password reset successful. You can now log in.");
    Ok(())
}
