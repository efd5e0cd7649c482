use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blindcoin::config::ProtocolConfig;
use blindcoin::ecash::{determine_cheater, Bank, CoinRequest, IdentityCommitment, Merchant};

#[derive(Parser)]
#[command(name = "blindcoin")]
#[command(about = "Mint a blind-signed coin, spend it twice and catch the double spender")]
#[command(version)]
struct Cli {
    /// Spender identity embedded in the coin's secret shares
    #[arg(long, default_value = "alice")]
    identity: String,

    /// Coin denomination
    #[arg(long, default_value_t = 20)]
    amount: u64,

    /// Identity slots per coin (overrides the config file)
    #[arg(long)]
    ris_length: Option<usize>,

    /// Bank RSA modulus size in bits (overrides the config file)
    #[arg(long)]
    key_bits: Option<usize>,

    /// Seed for a deterministic run; the OS RNG is used otherwise
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with `ris_length` and `key_bits`
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<ProtocolConfig> {
    let mut config = match &cli.config {
        Some(path) => ProtocolConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ProtocolConfig::default(),
    };
    if let Some(ris_length) = cli.ris_length {
        config.ris_length = ris_length;
    }
    if let Some(key_bits) = cli.key_bits {
        config.key_bits = key_bits;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = load_config(&cli)?;
    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(OsRng).context("seeding RNG from the OS")?,
    };

    info!(key_bits = config.key_bits, "generating bank key");
    let bank = Bank::generate(config.key_bits, &mut rng)?;

    let commitment = IdentityCommitment::commit(&cli.identity, config.ris_length, &mut rng)?;
    let request = CoinRequest::new(cli.amount, &commitment, bank.public_key(), &mut rng)?;
    let blind_signature = bank.sign(request.blinded());
    let coin = request.finalize(&blind_signature)?;
    println!(
        "Minted coin {} worth {} for {}",
        coin.guid.simple(),
        coin.amount,
        commitment.identity()
    );

    let merchant = Merchant::new(bank.public_key().clone(), config.ris_length);
    let ris1 = merchant.accept(&coin, &commitment, &mut rng)?;
    let ris2 = merchant.accept(&coin, &commitment, &mut rng)?;

    println!("\n--- Double Spend Check ---");
    println!("{}", determine_cheater(&coin.guid, &ris1, &ris2));

    println!("\n--- Same RIS Check ---");
    println!("{}", determine_cheater(&coin.guid, &ris1, &ris1));

    Ok(())
}
