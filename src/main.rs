use anyhow::Context;
use deskscene::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::from_env();
    if let Some(dir) = std::env::args_os().nth(1) {
        config = config.with_texture_dir(dir);
    }
    log::info!("Loading textures from {:?}", config.texture_dir);

    deskscene::run(config).context("desk scene exited with an error")
}
