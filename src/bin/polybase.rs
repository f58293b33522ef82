/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of polybase.
 *
 * polybase is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * polybase is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with polybase. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use polybase::presets;
use polybase::{
    base1, charsets, Base1, Base85, Base91, Charset, Codec, ConfigError,
    Settings,
};
use tracing_subscriber::EnvFilter;

use std::fmt::Display;
use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::str::FromStr;

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Base {
    Base1,
    Base16,
    Base32,
    Base58,
    Base64,
    Base85,
    Base91,
    /// Digits 0-9a-z in the radix given by --radix
    Simple,
    /// The alphabet given by --charset
    Custom,
}

/// Encodes or decodes data from [FILE] and writes the result to standard
/// output. If [FILE] is missing or "-", the data is read from standard input.
#[derive(Parser, Debug)]
#[command(name = "polybase", version)]
struct Cli {
    /// Encoding to use
    #[arg(value_enum)]
    base: Base,

    /// Input file
    file: Option<PathBuf>,

    /// Decode data instead of encoding
    #[arg(short, long)]
    decode: bool,

    /// Alphabet variant, e.g. "crockford" for base32 or "z85" for base85
    #[arg(long, value_name = "NAME")]
    version_name: Option<String>,

    /// Radix for the simple encoding (2 to 36)
    #[arg(long, default_value_t = 10)]
    radix: usize,

    /// Symbols for the custom encoding, or the symbol for base1
    #[arg(long, value_name = "SYMBOLS")]
    charset: Option<String>,

    /// Treat the input as a little-endian number
    #[arg(long)]
    little_endian: bool,

    /// Don't emit padding symbols or keep leading zero bytes
    #[arg(long)]
    no_padding: bool,

    /// Skip unknown symbols instead of failing
    #[arg(long)]
    no_integrity: bool,

    /// Upper-case the output
    #[arg(long)]
    upper: bool,

    /// Break output into lines of N symbols
    #[arg(long, value_name = "N")]
    wrap: Option<NonZeroUsize>,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.little_endian = self.little_endian;
        settings.padding = !self.no_padding;
        settings.integrity = !self.no_integrity;
        settings.upper = self.upper;
        settings.line_wrap = self.wrap;
        settings
    }

    fn version<T>(&self) -> Result<T, ConfigError>
    where
        T: Default + FromStr<Err = ConfigError>,
    {
        self.version_name.as_deref().map_or_else(|| Ok(T::default()), str::parse)
    }

    fn codec(&self) -> Result<Box<dyn Codec>> {
        let settings = self.settings();
        let codec: Box<dyn Codec> = match self.base {
            Base::Base1 => {
                let symbol = self
                    .charset
                    .as_deref()
                    .and_then(|s| s.chars().next())
                    .unwrap_or(base1::DEFAULT_SYMBOL);
                Box::new(Base1::new(symbol, settings)?)
            }
            Base::Base16 => Box::new(presets::base16(settings)?),
            Base::Base32 => Box::new(presets::base32(self.version()?, settings)?),
            Base::Base58 => Box::new(presets::base58(self.version()?, settings)?),
            Base::Base64 => Box::new(presets::base64(self.version()?, settings)?),
            Base::Base85 => Box::new(Base85::new(self.version()?, settings)?),
            Base::Base91 => Box::new(Base91::new(
                Charset::from_str(charsets::BASE91)?,
                settings,
            )?),
            Base::Simple => Box::new(presets::simple(self.radix, settings)?),
            Base::Custom => {
                let symbols = self
                    .charset
                    .as_deref()
                    .context("the custom encoding needs --charset")?;
                Box::new(presets::custom(symbols, None, settings)?)
            }
        };
        Ok(codec)
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            File::open(path)
                .with_context(|| {
                    format!("could not open file '{}'", path.display())
                })?
                .read_to_end(&mut input)
                .context("could not read input")?;
        }
        None => {
            stdin().read_to_end(&mut input).context("could not read input")?;
        }
    }
    Ok(input)
}

fn run(cli: &Cli) -> Result<()> {
    let codec = cli.codec()?;
    let input = read_input(cli.file.as_deref())?;
    tracing::debug!(base = ?cli.base, decode = cli.decode, bytes = input.len(), "read input");

    let mut writer = BufWriter::new(stdout().lock());
    let written = if cli.decode {
        let text = String::from_utf8(input).context("input is not valid UTF-8")?;
        let decoded = codec
            .decode(text.trim_end())
            .with_context(|| format!("input is not valid {:?} data", cli.base))?;
        if decoded.negative {
            tracing::warn!("decoded value is negative; writing its magnitude");
        }
        writer.write_all(&Vec::from(decoded))
    } else {
        let encoded = codec.encode(&input)?;
        writeln!(writer, "{}", encoded)
    };
    written
        .and_then(|()| writer.flush())
        .context("could not write to standard output")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error_exit!("{:#}", e);
    }
}
