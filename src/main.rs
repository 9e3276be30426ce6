//! Talent matcher: project staffing and activity recommendation tool

use clap::Parser;
use log::{error, info, warn};
use std::path::Path;
use std::process;
use talent_matcher::cli::{self, Cli, Commands, ConfigAction, DescriptionSource, OutputArgs, WeightArgs};
use talent_matcher::config::{Config, SimilarityConfig};
use talent_matcher::error::{Result, TalentMatcherError};
use talent_matcher::input::InputManager;
use talent_matcher::output::report::{ActivityReport, ProfileReport, ProjectReport, ReportMetadata, StaffingReport};
use talent_matcher::output::{save_report_to_file, Report, ReportGenerator};
use talent_matcher::processing::{KeywordExtractor, ProfileBuilder};
use talent_matcher::roster::{Roster, RosterLoader};
use talent_matcher::scoring::{MatchScorer, SimilarityScorer};
use talent_matcher::session::Session;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
const ROSTER_EXTENSIONS: &[&str] = &["csv", "tsv", "tab", "xlsx", "xls"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    let mut input_manager = InputManager::new();

    match command {
        Commands::Project { source, output } => {
            info!("Extracting project key information");
            let (text, origin) = read_description(&mut input_manager, &source).await?;

            let info = KeywordExtractor::new()?.extract(&text);
            if info.is_empty() {
                warn!("No labeled project fields found in {}", origin);
            }

            let report = Report::Project(ProjectReport::new(ReportMetadata::new(origin), &info));
            emit(&report, &output, &config)
        }

        Commands::Staff {
            source,
            keywords,
            roster,
            top_n,
            output,
        } => {
            validate_path(&roster, ROSTER_EXTENSIONS, "Roster file")?;

            let (keywords, origin) = match keywords {
                Some(keywords) => (keywords, "keywords".to_string()),
                None => {
                            let (text, origin) = read_description(&mut input_manager, &source).await?;
                    let info = KeywordExtractor::new()?.extract(&text);
                    let skills = info.required_skills().map(str::to_string).ok_or_else(|| {
                        TalentMatcherError::EmptyInput(format!("No 'Compétences requises' field in {}", origin))
                    })?;
                    (skills, origin)
                }
            };

            let roster = RosterLoader::load(&roster)?;
            let top_n = top_n.unwrap_or(config.matching.default_top_n);

            info!("Ranking {} roster rows against '{}'", roster.len(), keywords);
            let candidates = MatchScorer::new(&config.matching)?.rank(&roster, &keywords, top_n)?;

            let report = Report::Staffing(StaffingReport {
                metadata: ReportMetadata::new(origin),
                keywords,
                roster_size: roster.len(),
                candidates,
            });
            emit(&report, &output, &config)
        }

        Commands::Profile { cv, output } => {
            validate_path(&cv, DOCUMENT_EXTENSIONS, "CV file")?;

            let text = input_manager.extract_text(&cv).await?;
            let profile = ProfileBuilder::new(&config)?.build(&text);

            let report = Report::Profile(ProfileReport {
                metadata: ReportMetadata::new(cv.display().to_string()),
                profile,
            });
            emit(&report, &output, &config)
        }

        Commands::Activities {
            roster,
            cv,
            person,
            target,
            top_n,
            neighbours,
            weights,
            output,
        } => {
            validate_path(&roster, ROSTER_EXTENSIONS, "Roster file")?;

            let similarity = apply_weight_overrides(&config.similarity, &weights);
            let scorer = SimilarityScorer::new(similarity)?;
            let top_n = top_n.unwrap_or(config.matching.default_top_n);
            let neighbours = neighbours.unwrap_or(top_n);

            let mut session = Session::with_roster(RosterLoader::load(&roster)?)?;

            let target = if let Some(cv) = cv {
                validate_path(&cv, DOCUMENT_EXTENSIONS, "CV file")?;
                    let text = input_manager.extract_text(&cv).await?;
                let record = ProfileBuilder::new(&config)?.build(&text).record;
                if record.name.is_empty() {
                    return Err(TalentMatcherError::InvalidInput(format!(
                        "No name could be read from {}",
                        cv.display()
                    )));
                }
                let name = record.name.clone();
                session.add_people(&Roster::new(vec![record]))?;
                name
            } else if let Some(person) = person {
                validate_path(&person, ROSTER_EXTENSIONS, "Person file")?;
                let people = RosterLoader::load_people(&person)?;
                let name = people
                    .records()
                    .first()
                    .map(|r| r.name.clone())
                    .ok_or_else(|| TalentMatcherError::EmptyInput(format!("No person in {}", person.display())))?;
                session.add_people(&people)?;
                name
            } else if let Some(target) = target {
                target
            } else {
                return Err(TalentMatcherError::InvalidInput(
                    "Provide one of --cv, --person or --target".to_string(),
                ));
            };

            info!("Recommending activities for '{}'", target);
            let recommendation = session.recommend(&scorer, &target, neighbours, top_n)?;

            let report = Report::Activities(ActivityReport {
                metadata: ReportMetadata::new(roster.display().to_string()),
                roster_size: session.roster().len(),
                recommendation,
            });
            emit(&report, &output, &config)
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| TalentMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
                Ok(())
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
                Ok(())
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("🔧 {} = {}", key, value);
                Ok(())
            }
        },
    }
}

/// Read a description from a file or inline text, with a label for reports.
async fn read_description(input_manager: &mut InputManager, source: &DescriptionSource) -> Result<(String, String)> {
    match (&source.description, &source.text) {
        (Some(path), _) => {
            validate_path(path, DOCUMENT_EXTENSIONS, "Description file")?;
            let text = input_manager.extract_text(path).await?;
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) if !text.trim().is_empty() => Ok((text.clone(), "inline text".to_string())),
        (None, Some(_)) => Err(TalentMatcherError::EmptyInput("The description text is blank".to_string())),
        (None, None) => Err(TalentMatcherError::InvalidInput(
            "Provide a description with --description or --text".to_string(),
        )),
    }
}

fn validate_path(path: &Path, allowed: &[&str], what: &str) -> Result<()> {
    cli::validate_file_extension(path, allowed)
        .map_err(|e| TalentMatcherError::UnsupportedFormat(format!("{}: {}", what, e)))
}

fn apply_weight_overrides(base: &SimilarityConfig, weights: &WeightArgs) -> SimilarityConfig {
    SimilarityConfig {
        skills: weights.skills_weight.unwrap_or(base.skills),
        education: weights.education_weight.unwrap_or(base.education),
        training: weights.training_weight.unwrap_or(base.training),
        activity: weights.activity_weight.unwrap_or(base.activity),
    }
}

fn emit(report: &Report, output: &OutputArgs, config: &Config) -> Result<()> {
    let format = match &output.format {
        Some(format) => cli::parse_output_format(format).map_err(TalentMatcherError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = output.detailed || config.output.detailed;

    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
    let content = generator.generate_report(report, &format)?;

    if report.has_no_results() {
        info!("Completed with no results");
    }

    match &output.save {
        Some(path) => {
            save_report_to_file(&content, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
