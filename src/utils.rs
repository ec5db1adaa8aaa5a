//! Utils

use clap::Parser;

/// Arguments for the report demo
#[derive(Debug, Parser)]
pub struct ExampleReportArgs {
    /// Fixture set to report on
    #[clap(short, long, default_value = "week")]
    pub fixture: String,

    /// Restaurant key to print vendor sheets for; all restaurants when omitted
    #[clap(short, long)]
    pub restaurant: Option<String>,

    /// Directory to write one CSV per order group into
    #[clap(short, long)]
    pub out: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_week_fixture() -> TestResult {
        let args = ExampleReportArgs::try_parse_from(["report"])?;

        assert_eq!(args.fixture, "week");
        assert!(args.restaurant.is_none());
        assert!(args.out.is_none());

        Ok(())
    }

    #[test]
    fn accepts_restaurant_and_out() -> TestResult {
        let args = ExampleReportArgs::try_parse_from(["report", "-r", "zed", "--out", "target/csv"])?;

        assert_eq!(args.restaurant.as_deref(), Some("zed"));
        assert_eq!(args.out.as_deref(), Some("target/csv"));

        Ok(())
    }
}
