//! Interactive dashboard.
//!
//! Keeps one controller per page alive for the whole session, so results,
//! the chat transcript and the signed-in user carry over between commands.
//! The prompt shows the backend status and the current user.

use anyhow::{Context, Result};
use client::controllers::{
    CampaignController, CampaignField, ChatController, CompetitorController, RevenueController,
    RevenueField,
};
use client::{HealthMonitor, SubmitError};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{
    Dashboard, auth, campaign, chat, competitor, flush_prompt, read_password, revenue, status,
};

const HELP: &str = "\
Commands:
  competitor <url or name>          analyze a competitor
  revenue [field=value ...]         run the revenue simulator
                                    (visitors, conversion_rate, average_order_value, ad_spend)
  export <path>                     save the last projections as CSV
  campaign                          generate a campaign (prompts for details)
  chat <message>                    ask the assistant
  transcript                        show the chat so far
  login [username]                  sign in
  logout                            sign out
  whoami                            show the signed-in user
  status                            show backend status
  help                              show this help
  quit                              leave the dashboard";

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Help,
    Status,
    Competitor(String),
    Revenue(Vec<(RevenueField, String)>),
    Export(PathBuf),
    Campaign,
    Chat(String),
    Transcript,
    Login(Option<String>),
    Logout,
    WhoAmI,
    Quit,
}

fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "status" => ShellCommand::Status,
        "competitor" => ShellCommand::Competitor(rest.to_string()),
        "revenue" => ShellCommand::Revenue(parse_assignments(rest)?),
        "export" if !rest.is_empty() => ShellCommand::Export(PathBuf::from(rest)),
        "export" => return Err("usage: export <path>".to_string()),
        "campaign" => ShellCommand::Campaign,
        "chat" => ShellCommand::Chat(rest.to_string()),
        "transcript" => ShellCommand::Transcript,
        "login" => ShellCommand::Login((!rest.is_empty()).then(|| rest.to_string())),
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::WhoAmI,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

fn parse_assignments(rest: &str) -> Result<Vec<(RevenueField, String)>, String> {
    rest.split_whitespace()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected field=value, got '{pair}'"))?;
            Ok((name.parse::<RevenueField>()?, value.to_string()))
        })
        .collect()
}

struct Shell<'a> {
    dashboard: &'a Dashboard,
    monitor: HealthMonitor,
    competitor: CompetitorController,
    revenue: RevenueController,
    campaign: CampaignController,
    chat: ChatController,
    input: Lines<BufReader<Stdin>>,
}

pub async fn run(dashboard: &Dashboard) -> Result<()> {
    let api = dashboard.api.clone();
    let mut shell = Shell {
        dashboard,
        monitor: HealthMonitor::spawn(api.clone(), dashboard.config.health_interval()),
        competitor: CompetitorController::new(api.clone()),
        revenue: RevenueController::new(api.clone()),
        campaign: CampaignController::new(api.clone()),
        chat: ChatController::new(api),
        input: BufReader::new(tokio::io::stdin()).lines(),
    };

    println!("MarketMind dashboard. Type 'help' for commands.");
    loop {
        flush_prompt(&shell.prompt());
        let Some(line) = shell.input.next_line().await.context("failed to read input")? else {
            break;
        };
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(err) = shell.execute(command).await {
            eprintln!("{err:#}");
        }
    }

    shell.monitor.shutdown().await;
    Ok(())
}

impl Shell<'_> {
    fn prompt(&self) -> String {
        let status = status::render_status(self.monitor.status());
        let user = self
            .dashboard
            .session
            .current_user()
            .map(|user| format!(" @{}", user.username))
            .unwrap_or_default();
        format!("[{status}{user}] marketmind> ")
    }

    async fn ask(&mut self, question: &str) -> Result<String> {
        flush_prompt(question);
        let line = self
            .input
            .next_line()
            .await
            .context("failed to read input")?
            .unwrap_or_default();
        Ok(line)
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Status => {
                println!("{}", status::render_status(self.monitor.status()));
            }
            ShellCommand::Competitor(target) => {
                let analysis = self.competitor.analyze(&target).await?;
                print!("{}", competitor::render_analysis(&analysis));
            }
            ShellCommand::Revenue(assignments) => {
                for (field, raw) in &assignments {
                    self.revenue.set_field(*field, raw);
                }
                let simulation = self.revenue.simulate().await?;
                print!("{}", revenue::render_simulation(&simulation));
            }
            ShellCommand::Export(path) => {
                revenue::export(&self.revenue, &path)?;
                println!("Projections exported to {}", path.display());
            }
            ShellCommand::Campaign => self.generate_campaign().await?,
            ShellCommand::Chat(message) => chat::send(&self.chat, &message).await,
            ShellCommand::Transcript => {
                for entry in self.chat.transcript() {
                    println!("{}", chat::render_entry(&entry));
                }
            }
            ShellCommand::Login(username) => {
                let username = match username {
                    Some(username) => username,
                    None => self.ask("Username: ").await?,
                };
                let password = read_password("Password: ").await?;
                let args = auth::LoginArgs {
                    username: Some(username),
                    password: Some(password),
                };
                auth::login(self.dashboard, args).await?;
            }
            ShellCommand::Logout => {
                self.dashboard.session.logout();
                println!("Signed out.");
            }
            ShellCommand::WhoAmI => {
                let user = auth::require_session(self.dashboard)?;
                println!("{} (@{})", user.name, user.username);
            }
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    async fn generate_campaign(&mut self) -> Result<()> {
        let form = self.campaign.form();
        for (field, question, current) in [
            (CampaignField::Audience, "Target audience", form.audience),
            (CampaignField::RevenueGoal, "Revenue goal", form.revenue_goal),
            (
                CampaignField::CompetitorInsight,
                "Competitor insight (optional)",
                form.competitor_insight,
            ),
        ] {
            let question = if current.is_empty() {
                format!("{question}: ")
            } else {
                format!("{question} [{current}]: ")
            };
            let answer = self.ask(&question).await?;
            if !answer.trim().is_empty() {
                self.campaign.set_field(field, answer.trim());
            }
        }

        match self.campaign.generate().await {
            Ok(plan) => print!("{}", campaign::render_campaign(&plan)),
            Err(err @ SubmitError::Required(_)) => eprintln!("{err}"),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("help"), Ok(Some(ShellCommand::Help)));
        assert_eq!(parse("EXIT"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(parse("login"), Ok(Some(ShellCommand::Login(None))));
        assert_eq!(
            parse("login admin"),
            Ok(Some(ShellCommand::Login(Some("admin".into()))))
        );
    }

    #[test]
    fn test_parse_keeps_free_text() {
        assert_eq!(
            parse("competitor  Acme Corp "),
            Ok(Some(ShellCommand::Competitor("Acme Corp".into())))
        );
        assert_eq!(
            parse("chat how do I grow?"),
            Ok(Some(ShellCommand::Chat("how do I grow?".into())))
        );
    }

    #[test]
    fn test_parse_revenue_assignments() {
        assert_eq!(
            parse("revenue visitors=5000 ad_spend=oops"),
            Ok(Some(ShellCommand::Revenue(vec![
                (RevenueField::Visitors, "5000".into()),
                (RevenueField::AdSpend, "oops".into()),
            ])))
        );
        assert_eq!(parse("revenue"), Ok(Some(ShellCommand::Revenue(Vec::new()))));
        assert!(parse("revenue budget=5").is_err());
        assert!(parse("revenue visitors").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("export").is_err());
        assert_eq!(
            parse("export out.csv"),
            Ok(Some(ShellCommand::Export(PathBuf::from("out.csv"))))
        );
        assert_eq!(
            parse("dance"),
            Err("unknown command 'dance'; type 'help'".to_string())
        );
    }
}
