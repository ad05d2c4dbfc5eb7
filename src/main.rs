//! Command line front end for the `tlvframe` codec.
//!
//! Encodes `KIND:TAG[:VALUE]` fields into a hex buffer, or decodes a hex
//! buffer into one line per element.

mod cli;

use std::{num::ParseIntError, process::ExitCode};

use clap::Parser;
use cli::{Cli, Command, FieldKind, FieldSpec};
use thiserror::Error;
use tlvframe::{FieldWidthPolicy, TlvEncoder, TlvError, TlvIterable};

/// Failures reported by the binary.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Codec(#[from] TlvError),

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid value for `{field}`: {source}")]
    Value {
        field: String,
        #[source]
        source: ParseIntError,
    },
}

fn main() -> ExitCode {
    // Library `log` records are bridged into the subscriber.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "tlvframe failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let policy = FieldWidthPolicy::new(cli.type_width, cli.length_width).map_err(TlvError::from)?;
    match &cli.command {
        Command::Encode { capacity, fields } => encode(policy, *capacity, fields),
        Command::Decode { hex } => decode(policy, hex),
    }
}

fn encode(policy: FieldWidthPolicy, capacity: usize, fields: &[FieldSpec]) -> Result<String, CliError> {
    let mut encoder = TlvEncoder::new(policy, capacity);
    for field in fields {
        let tag = field.tag;
        let appended = match field.kind {
            FieldKind::Byte => encoder.put_byte(tag, parse_value(field)?),
            FieldKind::Short => encoder.put_short(tag, parse_value(field)?),
            FieldKind::Int => encoder.put_int(tag, parse_value(field)?),
            FieldKind::Bytes => encoder.put_byte_array(tag, &hex::decode(&field.value)?),
            FieldKind::String => encoder.put_string(tag, &field.value),
            FieldKind::Empty => encoder.put_zero_length_element(tag),
        };
        appended.map_err(TlvError::from)?;
    }
    tracing::debug!(actual_length = encoder.actual_length(), "encoded fields");
    Ok(hex::encode(encoder.as_bytes()))
}

fn decode(policy: FieldWidthPolicy, input: &str) -> Result<String, CliError> {
    let bytes = hex::decode(input.trim())?;
    let iterable = TlvIterable::new(policy, &bytes, bytes.len()).map_err(TlvError::from)?;
    let mut lines = Vec::new();
    for element in &iterable {
        let element = element.map_err(TlvError::from)?;
        lines.push(format!(
            "type={} length={} payload={}",
            element.tag(),
            element.len(),
            hex::encode(element.as_bytes())
        ));
    }
    Ok(lines.join("\n"))
}

fn parse_value<T>(field: &FieldSpec) -> Result<T, CliError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    field.value.parse().map_err(|source| CliError::Value {
        field: field.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::*;

    fn run_args(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::parse_from(std::iter::once("tlvframe").chain(args.iter().copied()));
        run(&cli)
    }

    #[rstest]
    #[case(&["encode", "-c", "15", "byte:0:2", "bytes:2:000102"][..], "0001020203000102")]
    #[case(&["-t", "0", "encode", "-c", "15", "byte:0:2", "bytes:2:000102"][..], "010203000102")]
    #[case(
        &["-t", "2", "-l", "2", "encode", "int:0:2", "short:2:3", "empty:55"][..],
        "000000040000000200020002000300370000"
    )]
    fn encodes_fields_as_hex(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(run_args(args).expect("encode succeeds"), expected);
    }

    #[test]
    fn decodes_hex_into_element_lines() {
        let output = run_args(&["decode", "0001020203000102"]).expect("decode succeeds");
        assert_eq!(
            output,
            "type=0 length=1 payload=02\ntype=2 length=3 payload=000102"
        );
    }

    #[test]
    fn reports_truncated_input() {
        let err = run_args(&["decode", "00010202"]).expect_err("truncated input");
        assert!(matches!(err, CliError::Codec(TlvError::Decode(_))));
    }

    #[test]
    fn reports_invalid_policy() {
        let err = run_args(&["-t", "3", "decode", "00"]).expect_err("invalid width");
        assert!(matches!(err, CliError::Codec(TlvError::Policy(_))));
    }

    #[test]
    fn reports_overflow_and_bad_values() {
        let err = run_args(&["encode", "-c", "2", "byte:0:1"]).expect_err("overflow");
        assert!(matches!(err, CliError::Codec(TlvError::Encode(_))));

        let err = run_args(&["encode", "byte:0:300"]).expect_err("value out of range");
        assert!(matches!(err, CliError::Value { .. }));
    }
}
