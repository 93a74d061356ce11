use crate::cli::SignArgs;
use crate::utils::Result;
use crate::workflows::sign::{SignJob, SignRequest};

pub fn sign(args: SignArgs) -> Result<()> {
    let config = args.config.to_config();
    let request = SignRequest {
        size: args.size,
        message: args.message,
        image: args.image,
    };
    SignJob::new(&config).run(&request, &args.output_path)?;
    Ok(())
}
