use neighborrec_core::recommend_scored;
use neighborrec_shared::{AppEnv, AppError};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;
mod ratings;

use crate::output::render;
use crate::ratings::load_ratings;

fn main() -> Result<(), AppError> {
  // Load .env first so RUST_LOG can come from it.
  dotenvy::dotenv().ok();
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}=debug,neighborrec_core=debug", env!("CARGO_CRATE_NAME")).into()
      }),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(ErrorLayer::default())
    .init();

  let env = AppEnv::from_env()?;
  let matrix = load_ratings(&env.ratings_path)?;

  let recommendations =
    recommend_scored(&matrix, env.target_user, env.top_n).inspect_err(|err| {
      tracing::error!(target_user = env.target_user, %err, "Recommendation failed");
    })?;

  let rendered = render(&recommendations, env.target_user, env.top_n, env.output_format)?;
  print!("{rendered}");

  Ok(())
}
