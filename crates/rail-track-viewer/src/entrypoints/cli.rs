use clap::Parser;

/// Parses the command line arguments, exiting with clap's usage message on error.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
