fn main() -> anyhow::Result<()> {
    shelfkeep_observability::init();

    let config = shelfkeep_demo::DemoConfig::from_env();
    tracing::info!(output = ?config.output, "running lending demo");

    for line in shelfkeep_demo::run(&config)? {
        println!("{line}");
    }
    Ok(())
}
