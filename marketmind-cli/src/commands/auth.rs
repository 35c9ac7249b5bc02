use anyhow::{Result, bail};
use clap::Args;
use client::controllers::{
    LoginController, RegisterController, RegisterForm, RegisterOutcome, password_strength,
};
use shared::models::UserProfile;

use super::{Dashboard, prompt, read_password};

const STRENGTH_LABELS: [&str; 6] = ["Very weak", "Very weak", "Weak", "Fair", "Good", "Strong"];

#[derive(Args, Debug)]
#[command(about = "Sign in to MarketMind")]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long, short)]
    pub username: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(long, env = "MARKETMIND_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
#[command(about = "Create a MarketMind account")]
pub struct RegisterArgs {
    /// Display name (prompted when omitted)
    #[arg(long, short)]
    pub name: Option<String>,

    /// Username (prompted when omitted)
    #[arg(long, short)]
    pub username: Option<String>,
}

pub async fn login(dashboard: &Dashboard, args: LoginArgs) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => read_password("Password: ").await?,
    };

    let page = LoginController::new(dashboard.api.clone(), dashboard.session.clone());
    let user = page.login(&username, &password).await?;
    println!("{}", render_welcome(&user));
    Ok(())
}

pub async fn register(dashboard: &Dashboard, args: RegisterArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => prompt("Full name: ")?,
    };
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = read_password("Password: ").await?;
    println!("Password strength: {}", render_strength(&password));
    let confirm_password = read_password("Confirm password: ").await?;

    let form = RegisterForm {
        name,
        username,
        password,
        confirm_password,
    };
    let page = RegisterController::new(dashboard.api.clone(), dashboard.session.clone());
    match page.register(&form).await? {
        RegisterOutcome::SignedIn(session) => println!("{}", render_welcome(&session.user)),
        RegisterOutcome::Registered { message } => {
            println!("{message}");
            println!("Sign in with `marketmind login` to continue.");
        }
    }
    Ok(())
}

pub fn render_welcome(user: &UserProfile) -> String {
    format!("Logged in as {} (@{})", user.name, user.username)
}

/// Meter such as `[###--] Good`.
pub fn render_strength(password: &str) -> String {
    let score = usize::from(password_strength(password));
    let Some(label) = STRENGTH_LABELS.get(score) else {
        return String::new();
    };
    format!("[{}{}] {label}", "#".repeat(score), "-".repeat(5 - score))
}

/// Fails unless someone is signed in.
pub fn require_session(dashboard: &Dashboard) -> Result<UserProfile> {
    match dashboard.session.current_user() {
        Some(user) => Ok(user),
        None => bail!("not signed in"),
    }
}
