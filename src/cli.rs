use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::{Config, Result, Site, DEFAULT_CHAPTER_DELAY_MS, DEFAULT_SITE};

/// Download every chapter of a Weeb Central series into `<series>/<chapter>/` folders.
///
/// Chapters whose folder already exists are skipped, so an interrupted run can simply be repeated.
#[derive(Debug, Parser)]
#[command(name = "weebcentral-dl", version, disable_version_flag = true)]
pub struct Cli {
    /// Series page, e.g. https://weebcentral.com/series/01J76XYFCDK6Y8GY447DTTTZ2F
    pub locator: String,

    /// Directory the series folder is created in.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Pause between chapters, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_CHAPTER_DELAY_MS)]
    pub delay_ms: u64,

    /// Record failed chapters and continue with the next one instead of stopping.
    #[arg(long)]
    pub keep_going: bool,

    /// Base URL of the source site.
    #[arg(long, default_value = DEFAULT_SITE)]
    pub site: String,

    /// Print version.
    #[arg(
        short = 'v',
        short_alias = 'V',
        long,
        aliases = ["VERSION", "Version"],
        action = ArgAction::Version
    )]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        Ok(Config {
            locator: self.locator,
            output_dir: self.output_dir,
            chapter_delay: Duration::from_millis(self.delay_ms),
            keep_going: self.keep_going,
            site: Site::new(&self.site)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["weebcentral-dl", "https://weebcentral.com/series/ABC"])
            .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.locator, "https://weebcentral.com/series/ABC");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.chapter_delay, Duration::from_millis(4000));
        assert!(!config.keep_going);
        assert_eq!(config.site.base_url, "https://weebcentral.com");
    }

    #[test]
    fn all_options() {
        let cli = Cli::try_parse_from([
            "weebcentral-dl",
            "-o",
            "/tmp/manga",
            "--delay-ms",
            "0",
            "--keep-going",
            "--site",
            "http://localhost:8080",
            "http://localhost:8080/series/ABC",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/manga"));
        assert!(config.chapter_delay.is_zero());
        assert!(config.keep_going);
        assert_eq!(config.site.chapter_href_prefix, "http://localhost:8080/chapters/");
    }

    #[test]
    fn version_flags() {
        for flag in ["-v", "-V", "--version", "--VERSION", "--Version"] {
            let err = Cli::try_parse_from(["weebcentral-dl", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayVersion, "{flag}");
        }
    }

    #[test]
    fn locator_is_required() {
        let err = Cli::try_parse_from(["weebcentral-dl"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn bad_site_is_rejected() {
        let cli =
            Cli::try_parse_from(["weebcentral-dl", "--site", "nope", "https://x/series/A"]).unwrap();
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
