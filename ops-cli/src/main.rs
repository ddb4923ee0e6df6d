use error_common::{log_error, ErrorContext, Result};

use ops_cli::{cli::Cli, commands, config};

fn main() -> Result<()> {
    let cli = Cli::parse_ordered();

    let app_config = config::load(&cli.config)?;
    let logging = app_config.logging.clone().verbose(cli.verbose);
    logger_redacted::init("rustcare", &logging)?;

    tracing::debug!(
        command = cli.command.name(),
        config = %cli.config.display(),
        negative_total = ?app_config.billing.negative_total,
        quantity = ?app_config.billing.quantity,
        "Configuration loaded"
    );

    let result = commands::run(&cli, &app_config).and_then(|output| {
        commands::write_output(&mut std::io::stdout().lock(), &output, cli.json)
    });

    if let Err(err) = &result {
        let context = ErrorContext::new(cli.command.name())
            .add_context("json", cli.json.to_string());
        log_error(&context, err);
    }
    result
}
