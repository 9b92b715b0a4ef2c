use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    aws_blocks::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(aws_blocks::runner::handler)).await?;
    Ok(())
}
