#[cfg(test)]
mod tests {
    use super::super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    // Helper function to parse CLI args from a string slice
    fn parse_cli_from_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut cli_args = vec!["edugen"];
        cli_args.extend(args);
        Cli::try_parse_from(cli_args)
    }

    #[test]
    fn test_default_cli_parsing() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&[])?;

        assert_eq!(cli.api_url, "http://localhost:8000/api/v1");
        assert_eq!(cli.data_dir, PathBuf::from("~/.edugen"));
        assert_eq!(cli.timeout_secs, 120);
        assert!(!cli.verbose);

        Ok(())
    }

    #[test]
    fn test_api_url_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--api-url", "https://edugen.example.com/api/v1"])?;

        assert_eq!(cli.api_url, "https://edugen.example.com/api/v1");

        Ok(())
    }

    #[test]
    fn test_data_dir_and_timeout_flags() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--data-dir", "/tmp/edugen", "--timeout-secs", "30"])?;

        assert_eq!(cli.data_dir, PathBuf::from("/tmp/edugen"));
        assert_eq!(cli.timeout_secs, 30);

        Ok(())
    }

    #[test]
    fn test_short_verbose_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["-v"])?;

        assert!(cli.verbose);

        Ok(())
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(parse_cli_from_args(&["--timeout-secs", "soon"]).is_err());
    }
}
