#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_base_url, parse_timeout_ms};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_base_url_valid() {
        assert_eq!(
            parse_base_url("http://localhost:3000"),
            Ok("http://localhost:3000".to_string())
        );
        assert_eq!(
            parse_base_url("https://127.0.0.1:8443/"),
            Ok("https://127.0.0.1:8443".to_string())
        );
        assert_eq!(
            parse_base_url("  http://app.local  "),
            Ok("http://app.local".to_string())
        );
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert_eq!(
            parse_base_url("").unwrap_err(),
            "Base URL cannot be empty"
        );
        assert!(parse_base_url("localhost:3000").is_err());
        assert!(parse_base_url("ftp://localhost").is_err());
        assert!(parse_base_url("http://").is_err());
        assert!(parse_base_url("http:///").is_err());
    }

    #[test]
    fn test_parse_timeout_ms() {
        assert_eq!(parse_timeout_ms("10000"), Ok(10_000));
        assert!(parse_timeout_ms("0").is_err());
        assert!(parse_timeout_ms("-5").is_err());
        assert!(parse_timeout_ms("1.5").is_err());
    }

    #[test]
    fn test_run_named_scenarios() {
        let cli = Cli::try_parse_from(["pagecheck", "run", "automaton", "contact-search"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.scenarios, vec!["automaton", "contact-search"]);
                assert!(!args.all);
                assert!(args.plan.is_none());
                assert!(args.base_url.is_none());
                assert!(!args.visible);
                assert!(!args.exit_zero);
            }
            Command::List(_) => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_all_flags() {
        let cli = Cli::try_parse_from([
            "pagecheck",
            "run",
            "--all",
            "--base-url",
            "http://localhost:4000/",
            "--out-dir",
            "shots",
            "--timeout-ms",
            "15000",
            "--visible",
            "--echo-console",
            "--exit-zero",
        ])
        .unwrap();

        match cli.command {
            Command::Run(args) => {
                assert!(args.all);
                assert!(args.scenarios.is_empty());
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:4000"));
                assert_eq!(args.out_dir, Some(PathBuf::from("shots")));
                assert_eq!(args.timeout_ms, Some(15_000));
                assert!(args.visible);
                assert!(args.echo_console);
                assert!(args.exit_zero);
            }
            Command::List(_) => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_with_plan_and_names() {
        let cli =
            Cli::try_parse_from(["pagecheck", "run", "--plan", "plan.toml", "smoke"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.plan, Some(PathBuf::from("plan.toml")));
                assert_eq!(args.scenarios, vec!["smoke"]);
            }
            Command::List(_) => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_requires_a_selection() {
        assert!(Cli::try_parse_from(["pagecheck", "run"]).is_err());
    }

    #[test]
    fn test_run_all_conflicts_with_names() {
        assert!(Cli::try_parse_from(["pagecheck", "run", "--all", "automaton"]).is_err());
        assert!(Cli::try_parse_from(["pagecheck", "run", "--all", "--plan", "p.json"]).is_err());
    }

    #[test]
    fn test_run_rejects_bad_base_url() {
        assert!(
            Cli::try_parse_from(["pagecheck", "run", "--all", "--base-url", "localhost:3000"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["pagecheck", "run", "--all", "--timeout-ms", "0"]).is_err()
        );
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::try_parse_from(["pagecheck", "list", "--steps"]).unwrap();
        match cli.command {
            Command::List(args) => {
                assert!(args.steps);
                assert!(args.plan.is_none());
            }
            Command::Run(_) => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["pagecheck", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);

        let cli = Cli::try_parse_from(["pagecheck", "list", "--quiet", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);

        assert!(Cli::try_parse_from(["pagecheck", "-v", "-q", "list"]).is_err());
    }
}
