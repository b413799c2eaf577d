use env_logger::Env;
use matrix_sphere::{AppConfig, MatrixSphereApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = MatrixSphereApp::new(AppConfig::default())?;
    app.run()
}
