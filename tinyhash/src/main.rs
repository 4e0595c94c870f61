//! tinyhash command line front end.
//!
//! # Commands
//!
//! - `sum` - Print digests of files or stdin
//! - `check` - Compare a digest against an expected value
//! - `chain` - Hash text followed by the hex expansion of an earlier digest
//! - `soak` - Hash pseudo-random messages in random segments and cross-check
//! - `verify` - Re-check records written by `soak --record`
//!
//! Exit status is 0 on success, 1 when a digest does not match and 2 on any
//! other error.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{info, warn};

use tinyhash::bytes::hex;
use tinyhash::bytes::WriteExt;
use tinyhash::soak::{Soak, SoakRecord, RECORD_LEN};
use tinyhash::{Algorithm, DynHasher, DynOutput, MAX_OUTPUT_LEN};

const READ_CHUNK: usize = 4096;

#[derive(Parser)]
#[command(name = "tinyhash")]
#[command(version)]
#[command(about = "MD5, SHA-1, SHA-256 and RIPEMD-160 digests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of each file, or of stdin
    Sum {
        #[arg(short, long, default_value = "sha256")]
        algorithm: Algorithm,

        files: Vec<PathBuf>,
    },

    /// Compare the digest of a file (or stdin) with an expected hex digest
    Check {
        #[arg(short, long, default_value = "sha256")]
        algorithm: Algorithm,

        #[arg(short, long)]
        expected: String,

        /// Compare in time independent of the digest contents
        #[arg(long)]
        fixed_time: bool,

        file: Option<PathBuf>,
    },

    /// Hash TEXT followed by the lowercase hex of a previous digest (md5, sha256)
    Chain {
        #[arg(short, long, default_value = "sha256")]
        algorithm: Algorithm,

        /// The previous digest, in hex
        #[arg(short, long)]
        digest: String,

        #[arg(default_value = "")]
        text: String,
    },

    /// Cross-check segmented hashing against one-call hashing
    Soak {
        /// Restrict to one algorithm (default: cycle through all four)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        #[arg(short, long, default_value = "1000")]
        count: u32,

        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Append a 40-byte record per iteration to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Re-check every record in a file written by `soak --record`
    Verify {
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env().init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sum { algorithm, files } => cmd_sum(algorithm, &files),
        Commands::Check { algorithm, expected, fixed_time, file } => {
            cmd_check(algorithm, &expected, fixed_time, file.as_deref())
        }
        Commands::Chain { algorithm, digest, text } => cmd_chain(algorithm, &digest, &text),
        Commands::Soak { algorithm, count, seed, record } => {
            cmd_soak(algorithm, count, seed, record.as_deref())
        }
        Commands::Verify { file } => cmd_verify(&file),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn hash_reader<R: Read>(algorithm: Algorithm, mut reader: R) -> io::Result<DynOutput> {
    let mut sh = DynHasher::new(algorithm);
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(sh.result()),
            Ok(n) => sh.input(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

fn hash_path(algorithm: Algorithm, path: Option<&Path>) -> anyhow::Result<DynOutput> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            hash_reader(algorithm, file).with_context(|| format!("reading {}", path.display()))
        }
        None => hash_reader(algorithm, io::stdin().lock()).context("reading stdin"),
    }
}

fn parse_digest(algorithm: Algorithm, text: &str) -> anyhow::Result<DynOutput> {
    let mut raw = [0u8; MAX_OUTPUT_LEN];
    let raw = &mut raw[..algorithm.output_bytes()];
    hex::decode(text.trim(), raw).with_context(|| format!("parsing {} digest", algorithm))?;
    DynOutput::from_slice(algorithm, raw).context("digest length")
}

fn cmd_sum(algorithm: Algorithm, files: &[PathBuf]) -> anyhow::Result<bool> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut line = |digest: &DynOutput, name: &str| -> io::Result<()> {
        out.write_hex(digest.as_slice())?;
        writeln!(out, "  {}", name)
    };

    if files.is_empty() {
        line(&hash_path(algorithm, None)?, "-")?;
    }
    for path in files {
        line(&hash_path(algorithm, Some(path))?, &path.display().to_string())?;
    }
    out.flush()?;
    Ok(true)
}

fn cmd_check(algorithm: Algorithm, expected: &str, fixed_time: bool, file: Option<&Path>)
             -> anyhow::Result<bool> {
    let expected = parse_digest(algorithm, expected)?;
    let actual = hash_path(algorithm, file)?;
    let ok = if fixed_time {
        actual.matches_fixed_time(expected.as_slice())
    } else {
        actual.matches(expected.as_slice())
    };
    if ok {
        println!("OK");
    } else {
        println!("MISMATCH {}", actual);
    }
    Ok(ok)
}

fn cmd_chain(algorithm: Algorithm, digest: &str, text: &str) -> anyhow::Result<bool> {
    let prior = parse_digest(algorithm, digest)?;
    let mut sh = DynHasher::new(algorithm);
    sh.input(text.as_bytes());
    sh.add_expanded_hash(prior.as_slice())?;
    println!("{}", sh.result());
    Ok(true)
}

fn cmd_soak(algorithm: Option<Algorithm>, count: u32, seed: u64, record: Option<&Path>)
            -> anyhow::Result<bool> {
    let mut sink = match record {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let mut soak = Soak::new(seed);
    let mut failures = 0u32;
    for i in 0..count {
        let alg = algorithm.unwrap_or(Algorithm::ALL[i as usize % Algorithm::ALL.len()]);
        let outcome = soak.run(alg);
        if !outcome.passed {
            failures += 1;
            warn!("{} mismatch: {} bytes from lfsr state {:04x}",
                  alg, outcome.record.length, outcome.record.seed);
        }
        if let Some(sink) = sink.as_mut() {
            sink.write_all(&outcome.record.encode())?;
        }
    }
    if let Some(mut sink) = sink {
        sink.flush()?;
    }

    info!("soak seed {}: {} iterations, {} failures", seed, count, failures);
    println!("{} iterations, {} failures", count, failures);
    Ok(failures == 0)
}

fn cmd_verify(path: &Path) -> anyhow::Result<bool> {
    let mut data = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut data))
        .with_context(|| format!("reading {}", path.display()))?;
    if data.len() % RECORD_LEN != 0 {
        bail!("{} is {} bytes, not a whole number of {}-byte records",
              path.display(), data.len(), RECORD_LEN);
    }

    let mut tally = [(0u32, 0u32); 4];
    for (index, chunk) in data.chunks_exact(RECORD_LEN).enumerate() {
        let record = SoakRecord::decode(chunk)
            .with_context(|| format!("record {}", index))?;
        let slot = Algorithm::ALL.iter()
            .position(|&alg| alg == record.algorithm())
            .unwrap_or_default();
        if record.verify() {
            tally[slot].0 += 1;
        } else {
            tally[slot].1 += 1;
            warn!("record {}: {} digest {} does not match", index, record.algorithm(),
                  record.digest);
        }
    }

    let mut failed = 0;
    for (alg, &(good, bad)) in Algorithm::ALL.iter().zip(tally.iter()) {
        if good + bad > 0 {
            println!("{:<10} {} ok, {} bad", alg.name(), good, bad);
        }
        failed += bad;
    }
    Ok(failed == 0)
}
