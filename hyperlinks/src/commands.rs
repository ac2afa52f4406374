use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("hyperlinks")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("hyperlinks")
        .styles(CLAP_STYLING)
        .about(
            "Traverse the web as a linked graph from the starting --url, recording each \
            page's incoming and outgoing links until --limit pages have been visited.",
        )
        .arg(
            arg!(-u --"url" <START_URL>)
                .required(true)
                .help("URL where to start hyper-links crawling")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-l --"limit" <LIMIT>)
                .required(true)
                .help("Limit of URLs to traverse; must be positive")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            arg!(-o --"out" <PATH>)
                .required(false)
                .help("File path for the JSON output; defaults to stdout")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"pretty-print")
                .required(false)
                .help("Pretty-print the JSON output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"db-out" <PATH>)
                .required(false)
                .help("Also store one record per URL in a SQLite database at this path")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(-c --"concurrent")
                .required(false)
                .help("Issue each batch's HTTP requests concurrently")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-q --"quiet" "Suppress the progress spinner and non-essential output")
                .required(false)
                .action(clap::ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let matches = command_argument_builder()
            .try_get_matches_from(["hyperlinks", "--url", "http://x.com", "--limit", "5"])
            .unwrap();
        assert_eq!(matches.get_one::<Url>("url").unwrap().as_str(), "http://x.com/");
        assert_eq!(*matches.get_one::<u64>("limit").unwrap(), 5);
        assert!(!matches.get_flag("concurrent"));
        assert!(!matches.get_flag("pretty-print"));
    }

    #[test]
    fn rejects_zero_limit() {
        let result = command_argument_builder().try_get_matches_from([
            "hyperlinks",
            "--url",
            "http://x.com",
            "--limit",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unparsable_url() {
        let result = command_argument_builder().try_get_matches_from([
            "hyperlinks",
            "--url",
            "::not a url::",
            "--limit",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_all_output_options() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "hyperlinks",
                "--url",
                "http://x.com",
                "--limit",
                "2",
                "--out",
                "graph.json",
                "--pretty-print",
                "--db-out",
                "~/crawls/hyperlinks.db",
                "--concurrent",
                "--timeout",
                "3",
                "--quiet",
            ])
            .unwrap();
        assert!(matches.get_flag("concurrent"));
        assert!(matches.get_flag("quiet"));
        assert_eq!(*matches.get_one::<u64>("timeout").unwrap(), 3);
        assert!(matches.get_one::<std::path::PathBuf>("out").is_some());
    }
}
