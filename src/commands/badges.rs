use crate::cli::BadgesArgs;
use crate::utils::{read_names, Result};
use crate::workflows::badges::BadgeJob;

pub fn badges(args: BadgesArgs) -> Result<()> {
    let config = args.config.to_config();
    let names = read_names(&args.names_path)?;
    log::info!(
        "Read {} name(s) from {}",
        names.len(),
        args.names_path.display()
    );

    let count = BadgeJob::new(&config, &args.template, &args.name_token)
        .run(&names, &args.output_path)?;
    log::info!("Generated {} badge(s)", count);
    Ok(())
}
