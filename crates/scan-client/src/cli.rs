use clap::{Parser, Subcommand};
use flameo_protocol::audit::fields;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flameo-scan",
    version,
    about = "Submit site photos and safety audits to a Flaméo backend"
)]
pub(crate) struct Args {
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides `base_url` from the config file.
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    /// Also log to stderr, whatever `[logging] to_stderr` says.
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Detect risks in an image through the environment scan endpoint.
    Scan { image: PathBuf },
    /// Classify risks in an image through the prediction endpoint.
    Predict { image: PathBuf },
    /// Submit a building audit form.
    Audit {
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Show which usage section a selector value reveals.
    Sections {
        #[arg(long)]
        usage: String,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("field must be NAME=VALUE, got {raw}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in {raw}"));
    }
    if !fields::ALL.contains(&name) {
        return Err(format!(
            "unknown audit field {name}, expected one of: {}",
            fields::ALL.join(", ")
        ));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audit_fields_in_order() {
        let args = Args::try_parse_from([
            "flameo-scan",
            "audit",
            "--field",
            "buildingName=Salle des fêtes",
            "--field",
            "roomSizes=20,35=ok",
        ])
        .expect("parse");
        match args.command {
            Command::Audit { fields } => {
                assert_eq!(
                    fields,
                    vec![
                        ("buildingName".to_string(), "Salle des fêtes".to_string()),
                        ("roomSizes".to_string(), "20,35=ok".to_string()),
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_field_without_separator() {
        assert!(parse_field("buildingName").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn rejects_unknown_field_name() {
        let err = parse_field("buildingColor=rouge").unwrap_err();
        assert!(err.contains("unknown audit field buildingColor"), "{err}");
        assert!(parse_field(" staffAwareness =oui").is_ok());
        assert!(Args::try_parse_from(["flameo-scan", "audit", "--field", "nom=Mairie"]).is_err());
    }

    #[test]
    fn global_flags_have_defaults() {
        let args = Args::try_parse_from(["flameo-scan", "scan", "photo.png"]).expect("parse");
        assert_eq!(args.log_dir, PathBuf::from("logs"));
        assert!(!args.log_to_stderr);
        assert!(args.base_url.is_none());
        assert!(matches!(args.command, Command::Scan { .. }));
    }
}
