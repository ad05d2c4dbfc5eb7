//! Command line interface for the `tlvframe` binary.
//!
//! Kept free of library types so the build script can render a man page
//! from the same definition.

use std::{fmt, str::FromStr};

use clap::{Parser, Subcommand, ValueEnum};

/// Command line arguments for the `tlvframe` binary.
#[derive(Debug, Parser)]
#[command(name = "tlvframe", version, about = "Encode and decode TLV buffers")]
pub struct Cli {
    /// Bytes used for each element's type tag (0, 1, 2 or 4).
    #[arg(short, long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    pub type_width: i64,

    /// Bytes used for each element's payload length (1, 2 or 4).
    #[arg(short, long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    pub length_width: i64,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode fields into a buffer and print it as hex.
    Encode {
        /// Buffer capacity in bytes.
        #[arg(short, long, default_value_t = 1024)]
        capacity: usize,

        /// Fields as `KIND:TAG[:VALUE]`, for example `byte:0:2` or
        /// `bytes:2:000102`.
        #[arg(required = true)]
        fields: Vec<FieldSpec>,
    },
    /// Decode a hex buffer and print one line per element.
    Decode {
        /// Encoded buffer as hex.
        hex: String,
    },
}

/// Payload kind of a field given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// One unsigned byte.
    Byte,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Raw bytes given as hex.
    Bytes,
    /// UTF-8 text.
    String,
    /// Zero-length element; takes no value.
    Empty,
}

/// One `KIND:TAG[:VALUE]` field argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub tag: u32,
    pub value: String,
}

impl FromStr for FieldSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let kind = parts
            .next()
            .map(|kind| FieldKind::from_str(kind, true))
            .unwrap_or_else(|| Err(format!("missing field kind in `{s}`")))?;
        let tag = parts
            .next()
            .ok_or_else(|| format!("missing tag in `{s}`"))?
            .parse::<u32>()
            .map_err(|e| format!("invalid tag in `{s}`: {e}"))?;
        let value = parts.next().unwrap_or_default().to_owned();
        if kind == FieldKind::Empty && !value.is_empty() {
            return Err(format!("empty field `{s}` must not carry a value"));
        }
        Ok(Self { kind, tag, value })
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .kind
            .to_possible_value()
            .map(|v| v.get_name().to_owned())
            .unwrap_or_default();
        write!(f, "{kind}:{}", self.tag)?;
        if !self.value.is_empty() {
            write!(f, ":{}", self.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::{Cli, Command, FieldKind, FieldSpec};

    #[test]
    fn parses_encode_command() {
        let cli = Cli::parse_from([
            "tlvframe",
            "--type-width",
            "0",
            "encode",
            "--capacity",
            "15",
            "byte:0:2",
            "bytes:2:000102",
        ]);
        assert_eq!(cli.type_width, 0);
        assert_eq!(cli.length_width, 1);
        match cli.command {
            Command::Encode { capacity, fields } => {
                assert_eq!(capacity, 15);
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].kind, FieldKind::Bytes);
                assert_eq!(fields[1].value, "000102");
            }
            Command::Decode { .. } => panic!("expected encode command"),
        }
    }

    #[test]
    fn accepts_negative_widths_for_validation_later() {
        let cli = Cli::parse_from(["tlvframe", "decode", "-t", "-3", "0001"]);
        assert_eq!(cli.type_width, -3);
    }

    #[rstest]
    #[case("string:7:a:b", FieldKind::String, 7, "a:b")]
    #[case("EMPTY:55", FieldKind::Empty, 55, "")]
    #[case("int:0:-2", FieldKind::Int, 0, "-2")]
    fn parses_field_specs(
        #[case] input: &str,
        #[case] kind: FieldKind,
        #[case] tag: u32,
        #[case] value: &str,
    ) {
        let spec: FieldSpec = input.parse().expect("valid field spec");
        assert_eq!(spec.kind, kind);
        assert_eq!(spec.tag, tag);
        assert_eq!(spec.value, value);
    }

    #[rstest]
    #[case("float:0:1")]
    #[case("byte")]
    #[case("byte:x:1")]
    #[case("empty:1:2")]
    fn rejects_malformed_field_specs(#[case] input: &str) {
        assert!(input.parse::<FieldSpec>().is_err());
    }

    #[test]
    fn displays_field_specs() {
        let spec: FieldSpec = "Bytes:2:0a".parse().expect("valid field spec");
        assert_eq!(spec.to_string(), "bytes:2:0a");
    }
}
