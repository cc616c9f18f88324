#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use lawslot::{
    access::{authorize, Access, Role},
    io,
    message::{MessageRenderer, TextMessages},
    model::{DayOfWeek, LawyerId, RecordId, TimeOfDay},
    slots::{bookable_slots, SlotOptions},
    storage::{JsonStorage, Storage},
    validator::{AvailabilityBook, ConflictKind, OverrideDraft, ValidationError, WeeklyDraft},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de gestion des disponibilités d'un avocat (fichier JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des disponibilités
    #[arg(long, global = true, default_value = "availability.json")]
    availability: String,

    /// Date du jour (YYYY-MM-DD), par défaut la date locale
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un fichier vide pour un avocat
    Init {
        #[arg(long)]
        lawyer: String,
        /// Écraser un fichier existant (même illisible)
        #[arg(long)]
        force: bool,
    },

    /// Ajouter un créneau hebdomadaire
    AddWeekly {
        /// 0 = lundi … 6 = dimanche
        #[arg(long)]
        day: u8,
        /// HH:MM
        #[arg(long)]
        start: Option<TimeOfDay>,
        /// HH:MM
        #[arg(long)]
        end: Option<TimeOfDay>,
    },

    /// Supprimer un créneau hebdomadaire
    RemoveWeekly {
        #[arg(long)]
        id: String,
    },

    /// Ajouter une exception datée
    AddOverride {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        all_day: bool,
        #[arg(long)]
        start: Option<TimeOfDay>,
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Supprimer une exception
    RemoveOverride {
        #[arg(long)]
        id: String,
    },

    /// Importer des créneaux hebdomadaires depuis un CSV
    ImportWeekly {
        #[arg(long)]
        csv: String,
    },

    /// Importer des exceptions depuis un CSV
    ImportOverrides {
        #[arg(long)]
        csv: String,
    },

    /// Lister créneaux et exceptions
    List,

    /// Calculer les créneaux réservables
    Slots {
        /// Instant de référence (YYYY-MM-DDTHH:MM:SS), par défaut maintenant
        #[arg(long)]
        now: Option<NaiveDateTime>,
        #[arg(long, default_value_t = 7)]
        horizon_days: u32,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les conflits du fichier
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Vérifier l'accès d'un utilisateur à une page
    Authorize {
        /// liste "admins,lawyers,..."
        #[arg(long, value_delimiter = ',')]
        groups: Vec<String>,
        /// rôles autorisés "lawyer,admin"
        #[arg(long, value_delimiter = ',', required = true)]
        allow: Vec<Role>,
    },
}

/// Code 2 = proposition refusée / conflits trouvés
const REJECTED: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let storage = JsonStorage::new(&cli.availability);
    let renderer = TextMessages;

    let code = match cli.cmd {
        Commands::Init { lawyer, force } => {
            if storage.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    storage.path().display()
                );
            }
            let book = AvailabilityBook::new(LawyerId::new(lawyer));
            storage.save(book.availability())?;
            0
        }
        Commands::AddWeekly { day, start, end } => {
            let mut book = load_book(&storage)?;
            let draft = WeeklyDraft {
                day_of_week: DayOfWeek::new(day).map_err(anyhow::Error::msg)?,
                start,
                end,
            };
            match book.propose_weekly(&draft) {
                Ok(id) => {
                    storage.save(book.availability())?;
                    println!("{}", id.as_str());
                    0
                }
                Err(e) => reject(&renderer, &e),
            }
        }
        Commands::RemoveWeekly { id } => {
            let mut book = load_book(&storage)?;
            book.remove_weekly(&RecordId::new(id))?;
            storage.save(book.availability())?;
            0
        }
        Commands::AddOverride {
            date,
            all_day,
            start,
            end,
            description,
        } => {
            let draft = OverrideDraft {
                date,
                is_all_day: all_day,
                start,
                end,
                description,
            };
            let mut book = load_book(&storage)?;
            match book.propose_override(&draft, today) {
                Ok(id) => {
                    storage.save(book.availability())?;
                    println!("{}", id.as_str());
                    0
                }
                Err(e) => reject(&renderer, &e),
            }
        }
        Commands::RemoveOverride { id } => {
            let mut book = load_book(&storage)?;
            book.remove_override(&RecordId::new(id))?;
            storage.save(book.availability())?;
            0
        }
        Commands::ImportWeekly { csv } => {
            let drafts = io::import_weekly_csv(&csv)?;
            let mut book = load_book(&storage)?;
            let mut refused = None;
            for (idx, draft) in drafts.iter().enumerate() {
                if let Err(e) = book.propose_weekly(draft) {
                    eprintln!("{csv}: row {}", idx + 2);
                    refused = Some(e);
                    break;
                }
            }
            match refused {
                // rien n'est sauvegardé si une ligne est refusée
                Some(e) => reject(&renderer, &e),
                None => {
                    storage.save(book.availability())?;
                    println!("imported {} weekly slot(s)", drafts.len());
                    0
                }
            }
        }
        Commands::ImportOverrides { csv } => {
            let drafts = io::import_overrides_csv(&csv)?;
            let mut book = load_book(&storage)?;
            let mut refused = None;
            for (idx, draft) in drafts.iter().enumerate() {
                if let Err(e) = book.propose_override(draft, today) {
                    eprintln!("{csv}: row {}", idx + 2);
                    refused = Some(e);
                    break;
                }
            }
            match refused {
                Some(e) => reject(&renderer, &e),
                None => {
                    storage.save(book.availability())?;
                    println!("imported {} override(s)", drafts.len());
                    0
                }
            }
        }
        Commands::List => {
            let book = load_book(&storage)?;
            let availability = book.availability();
            println!("lawyer {}", availability.lawyer.as_str());
            for s in &availability.weekly {
                println!(
                    "{} | day {} | {} → {}",
                    s.id.as_str(),
                    s.day_of_week,
                    s.start,
                    s.end
                );
            }
            for o in &availability.overrides {
                let span = match o.bounds() {
                    Some((start, end)) => format!("{start} → {end}"),
                    None => "all day".to_string(),
                };
                println!(
                    "{} | {} | {} | {}",
                    o.id.as_str(),
                    o.date,
                    span,
                    o.description.as_deref().unwrap_or("Blocked")
                );
            }
            0
        }
        Commands::Slots {
            now,
            horizon_days,
            out_csv,
        } => {
            let now = now.unwrap_or_else(|| Local::now().naive_local());
            let book = load_book(&storage)?;
            let slots = bookable_slots(book.availability(), now, SlotOptions { horizon_days });
            if let Some(path) = out_csv {
                io::export_slots_csv(&path, &slots)
                    .with_context(|| format!("writing {path}"))?;
            }
            for s in &slots {
                println!("{} → {}", s.start.format("%Y-%m-%d %H:%M"), s.end.format("%H:%M"));
            }
            0
        }
        Commands::Check { report } => {
            let book = load_book(&storage)?;
            let conflicts = book.audit();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["first", "second", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.first.as_str(),
                            c.second.as_ref().map(RecordId::as_str).unwrap_or(""),
                            match c.kind {
                                ConflictKind::WeeklyOverlap => "weekly-overlap",
                                ConflictKind::OverrideAllDay => "override-all-day",
                                ConflictKind::OverrideOverlap => "override-overlap",
                                ConflictKind::Malformed => "malformed",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                REJECTED
            }
        }
        Commands::Authorize { groups, allow } => match authorize(&groups, &allow) {
            Access::Granted => {
                println!("granted");
                0
            }
            Access::Redirect(to) => {
                println!("redirect {to}");
                REJECTED
            }
        },
    };

    std::process::exit(code);
}

/// Fichier absent : carnet vide pour un avocat sans identifiant connu.
fn load_book(storage: &JsonStorage) -> Result<AvailabilityBook> {
    if storage.exists() {
        Ok(AvailabilityBook::from_snapshot(storage.load()?))
    } else {
        Ok(AvailabilityBook::new(LawyerId::random()))
    }
}

fn reject(renderer: &dyn MessageRenderer, error: &ValidationError) -> i32 {
    eprintln!("{}", renderer.render(error));
    REJECTED
}
