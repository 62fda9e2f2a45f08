use std::env;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, MultiSelect, Select, Text};

use crate::app::{App, Route};
use crate::clients::ApiClient;
use crate::config::AppConfig;
use crate::controllers::{CloseReason, Row};
use crate::error::SubmitError;
use crate::forms::multi_select;
use crate::forms::{AppointmentField, ParticipantField};
use crate::models::EntityId;
use crate::pages::DeleteOutcome;
use crate::service::gateway::Gateway;
use crate::service::prompter::{AssumeYes, Prompter, TerminalPrompter};

#[derive(Parser)]
#[command(name = "appointmentDesk", about = "Manage appointments and participants")]
struct Cli {
    /// KEY=VALUE config file; defaults to $CONFIG_FILE.
    #[arg(long, global = true)]
    config: Option<String>,
    /// Overrides API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Never prompt; missing form fields stay empty.
    #[arg(long, global = true)]
    no_prompt: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Appointments {
        #[command(subcommand)]
        action: AppointmentCommand,
    },
    Participants {
        #[command(subcommand)]
        action: ParticipantCommand,
    },
    /// Menu-driven session (the default).
    Interactive,
}

#[derive(Subcommand)]
enum AppointmentCommand {
    List,
    Create(AppointmentArgs),
    Update {
        id: EntityId,
        #[command(flatten)]
        fields: AppointmentArgs,
    },
    Delete {
        id: EntityId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ParticipantCommand {
    List,
    Create(ParticipantArgs),
    Delete {
        id: EntityId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Default, Clone)]
struct AppointmentArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    scheduler_name: Option<String>,
    #[arg(long)]
    scheduler_email: Option<String>,
    /// YYYY-MM-DDTHH:MM
    #[arg(long)]
    start_at: Option<String>,
    /// YYYY-MM-DDTHH:MM
    #[arg(long)]
    end_at: Option<String>,
    /// Participant id; repeat for several.
    #[arg(long = "participant")]
    participants: Option<Vec<EntityId>>,
}

impl AppointmentArgs {
    fn value(&self, field: AppointmentField) -> Option<&String> {
        match field {
            AppointmentField::Title => self.title.as_ref(),
            AppointmentField::Description => self.description.as_ref(),
            AppointmentField::SchedulerName => self.scheduler_name.as_ref(),
            AppointmentField::SchedulerEmail => self.scheduler_email.as_ref(),
            AppointmentField::StartAt => self.start_at.as_ref(),
            AppointmentField::EndAt => self.end_at.as_ref(),
        }
    }
}

#[derive(Args, Default, Clone)]
struct ParticipantArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(|| env::var("CONFIG_FILE").ok());
    let mut config = match config_path {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = &cli.api_url {
        config.set("API_URL", url.clone());
    }
    let settings = config.settings()?;
    let gateway: Arc<dyn Gateway> = Arc::new(ApiClient::new(&settings)?);

    let assume_yes = matches!(
        cli.command,
        Some(Commands::Appointments { action: AppointmentCommand::Delete { yes: true, .. } })
            | Some(Commands::Participants { action: ParticipantCommand::Delete { yes: true, .. } })
    );
    let prompter: Arc<dyn Prompter> = if assume_yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalPrompter)
    };
    let mut app = App::new(gateway, prompter, settings.timezone);
    let prompt = !cli.no_prompt;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Appointments { action } => appointments_command(&mut app, action, prompt).await,
        Commands::Participants { action } => participants_command(&mut app, action, prompt).await,
        Commands::Interactive => interactive(&mut app).await,
    }
}

async fn appointments_command(
    app: &mut App,
    action: AppointmentCommand,
    prompt: bool,
) -> anyhow::Result<()> {
    app.navigate(Route::Appointments).await;
    if let Some(error) = app.appointments().list().error() {
        return Err(anyhow!(error.to_string()));
    }
    match action {
        AppointmentCommand::List => println!("{}", app.render()),
        AppointmentCommand::Create(fields) => {
            app.open_create_appointment().await;
            appointment_form(app, fields, prompt).await?;
        }
        AppointmentCommand::Update { id, fields } => {
            if !app.open_update_appointment(id).await {
                return Err(anyhow!("Appointment {id} not found."));
            }
            appointment_form(app, fields, prompt).await?;
        }
        AppointmentCommand::Delete { id, .. } => {
            report_delete(app.delete_appointment(id).await?);
            println!("{}", app.render());
        }
    }
    Ok(())
}

async fn participants_command(
    app: &mut App,
    action: ParticipantCommand,
    prompt: bool,
) -> anyhow::Result<()> {
    app.navigate(Route::Participants).await;
    if let Some(error) = app.participants().list().error() {
        return Err(anyhow!(error.to_string()));
    }
    match action {
        ParticipantCommand::List => println!("{}", app.render()),
        ParticipantCommand::Create(fields) => {
            app.participants_mut().open_create();
            participant_form(app, fields, prompt).await?;
        }
        ParticipantCommand::Delete { id, .. } => {
            report_delete(app.delete_participant(id).await?);
            println!("{}", app.render());
        }
    }
    Ok(())
}

fn report_delete(outcome: DeleteOutcome) {
    if outcome == DeleteOutcome::Declined {
        println!("Nothing deleted.");
    }
}

/// Fills the open appointment panel and submits until it succeeds or the user gives up.
async fn appointment_form(app: &mut App, fields: AppointmentArgs, prompt: bool) -> anyhow::Result<()> {
    let mut fields = fields;
    loop {
        fill_appointment(app, &fields, prompt)?;
        match app.submit_appointment().await {
            Ok(()) => {
                println!("{}", app.render());
                return Ok(());
            }
            Err(err) => {
                if !retry(&err, prompt) {
                    app.appointments_mut().close(CloseReason::Cancel);
                    return Err(err.into());
                }
                fields = AppointmentArgs::default();
            }
        }
    }
}

fn fill_appointment(app: &mut App, fields: &AppointmentArgs, prompt: bool) -> anyhow::Result<()> {
    if let Some(error) = app.appointments().drawer().error() {
        eprintln!("{error}");
    }
    let now = app.now();
    for field in AppointmentField::ALL {
        let value = match fields.value(field) {
            Some(value) => value.clone(),
            None if prompt => {
                let page = app.appointments();
                let draft = page.drawer().draft();
                let help = match draft.min_for(field, now) {
                    Some(min) => format!("YYYY-MM-DDTHH:MM, {min} or later"),
                    None => String::new(),
                };
                let mut text = Text::new(field.label()).with_initial_value(draft.field(field));
                if !help.is_empty() {
                    text = text.with_help_message(&help);
                }
                text.prompt()?
            }
            None => continue,
        };
        app.appointments_mut().set_field(field, value);
    }

    match &fields.participants {
        Some(ids) => {
            let page = app.appointments_mut();
            let known = multi_select::selected_options(ids, page.options());
            if !page.options().is_empty() && known.len() != ids.len() {
                tracing::warn!(?ids, "some participant ids are not known to the backend");
            }
            page.set_participant_ids(ids.clone());
        }
        None if prompt && !app.appointments().options().is_empty() => {
            let page = app.appointments();
            let options = page.options().to_vec();
            let defaults = multi_select::default_indices(&page.drawer().draft().participants, &options);
            let selection = MultiSelect::new("Participants", options)
                .with_default(&defaults)
                .prompt_skippable()?;
            app.appointments_mut().set_participants(selection.as_deref());
        }
        None => {}
    }
    Ok(())
}

async fn participant_form(app: &mut App, fields: ParticipantArgs, prompt: bool) -> anyhow::Result<()> {
    let mut fields = fields;
    loop {
        if let Some(error) = app.participants().drawer().error() {
            eprintln!("{error}");
        }
        for (field, given) in [
            (ParticipantField::Name, fields.name.clone()),
            (ParticipantField::Email, fields.email.clone()),
        ] {
            let value = match given {
                Some(value) => value,
                None if prompt => {
                    let draft = app.participants().drawer().draft();
                    let current = match field {
                        ParticipantField::Name => draft.name.clone(),
                        ParticipantField::Email => draft.email.clone(),
                    };
                    Text::new(field.label()).with_initial_value(&current).prompt()?
                }
                None => continue,
            };
            app.participants_mut().set_field(field, value);
        }

        match app.submit_participant().await {
            Ok(()) => {
                println!("{}", app.render());
                return Ok(());
            }
            Err(err) => {
                if !retry(&err, prompt) {
                    app.participants_mut().close(CloseReason::Cancel);
                    return Err(err.into());
                }
                fields = ParticipantArgs::default();
            }
        }
    }
}

fn retry(err: &SubmitError, prompt: bool) -> bool {
    if !prompt {
        return false;
    }
    tracing::debug!(error = %err, "submission failed");
    Confirm::new("Edit and try again?")
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}

async fn interactive(app: &mut App) -> anyhow::Result<()> {
    loop {
        println!("\n{}\n", app.render());
        match app.route() {
            Route::Home => {
                let choice = Select::new("Go to", vec!["Appointments", "Participants", "Quit"]).prompt()?;
                match choice {
                    "Appointments" => app.navigate(Route::Appointments).await,
                    "Participants" => app.navigate(Route::Participants).await,
                    _ => return Ok(()),
                }
            }
            Route::Appointments => {
                let choice = Select::new(
                    "Appointments",
                    vec!["Add Appointment", "Update Appointment", "Delete Appointment", "Refresh", "Back"],
                )
                .prompt()?;
                match choice {
                    "Add Appointment" => {
                        app.open_create_appointment().await;
                        report(appointment_form(app, AppointmentArgs::default(), true).await);
                    }
                    "Update Appointment" => {
                        if let Some(id) = pick_row(app.appointments().list().rows())? {
                            app.open_update_appointment(id).await;
                            report(appointment_form(app, AppointmentArgs::default(), true).await);
                        }
                    }
                    "Delete Appointment" => {
                        if let Some(id) = pick_row(app.appointments().list().rows())? {
                            // Failures were already shown by the prompter.
                            let _ = app.delete_appointment(id).await;
                        }
                    }
                    "Refresh" => app.refresh().await,
                    _ => app.navigate(Route::Home).await,
                }
            }
            Route::Participants => {
                let choice = Select::new(
                    "Participants",
                    vec!["Add Participant", "Delete Participant", "Refresh", "Back"],
                )
                .prompt()?;
                match choice {
                    "Add Participant" => {
                        app.participants_mut().open_create();
                        report(participant_form(app, ParticipantArgs::default(), true).await);
                    }
                    "Delete Participant" => {
                        if let Some(id) = pick_row(app.participants().list().rows())? {
                            let _ = app.delete_participant(id).await;
                        }
                    }
                    "Refresh" => app.refresh().await,
                    _ => app.navigate(Route::Home).await,
                }
            }
        }
    }
}

fn report(result: anyhow::Result<()>) {
    if let Err(err) = result {
        eprintln!("{err:#}");
    }
}

fn pick_row<T: Row>(rows: &[T]) -> anyhow::Result<Option<EntityId>> {
    if rows.is_empty() {
        println!("Nothing to choose from.");
        return Ok(None);
    }
    let labels: Vec<String> = rows
        .iter()
        .map(|row| format!("#{} {}", row.id(), row.display_name()))
        .collect();
    let picked = Select::new("Which one?", labels)
        .raw_prompt_skippable()
        .context("selection prompt failed")?;
    Ok(picked.map(|option| rows[option.index].id()))
}
