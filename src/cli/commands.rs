use hearth_config::Config;
use hearth_core::format::{CodeCurrencyFormatter, CurrencyFormatter};
use hearth_domain::{FinancialHealthResult, ReservePolicy, Timeline};

use super::{output, parse_amount, parse_month, parse_today, CliContext};
use crate::{utils::build_info, HearthError};

pub const USAGE: &str = "Usage: hearth_cli [--json] [--quiet] [--high-contrast] <command>\n\
Commands:\n  \
health <household> <YYYY-MM> [YYYY-MM-DD]\n  \
timeline <household> <YYYY-MM>\n  \
chart <household> <YYYY-MM> [YYYY-MM-DD]\n  \
config show\n  \
config set-reserve <fixed|percentage> <value>\n  \
config set-weekend-weight <value>\n  \
config set-reference-income <value>\n  \
version";

pub(super) fn dispatch(context: &CliContext, args: &[String]) -> Result<(), HearthError> {
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return Err(HearthError::Usage("missing command".into()));
    };
    let rest = &args[1..];

    match command.as_str() {
        "health" => cmd_health(context, rest),
        "timeline" => cmd_timeline(context, rest),
        "chart" => cmd_chart(context, rest),
        "config" => cmd_config(context, rest),
        "version" => cmd_version(context),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => {
            eprintln!("{USAGE}");
            Err(HearthError::Usage(format!("unknown command `{other}`")))
        }
    }
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, HearthError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| HearthError::Usage(format!("missing <{name}> argument")))
}

fn cmd_health(context: &CliContext, args: &[String]) -> Result<(), HearthError> {
    let household = required(args, 0, "household")?;
    let month = parse_month(required(args, 1, "YYYY-MM")?)?;
    let today = parse_today(args.get(2), context.clock.as_ref())?;

    let dashboard = context.dashboard()?;
    let result = dashboard.health(household, month, today)?;
    if context.flags.json {
        println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        return Ok(());
    }

    let formatter = CodeCurrencyFormatter::new(dashboard.config().currency.clone());
    output::section(format!("Financial health: {household} {month}"));
    print_summary(&result, &formatter);
    Ok(())
}

fn print_summary(result: &FinancialHealthResult, formatter: &dyn CurrencyFormatter) {
    output::row("Status", output::status_label(result.status));
    output::row("Current balance", formatter.format_amount(result.current_balance));
    output::row("Minimum reserve", formatter.format_amount(result.minimum_reserve));
    output::row("Daily budget", formatter.format_amount(result.daily_budget));
    output::row(
        "Future commitments",
        formatter.format_amount(result.future_commitments),
    );
    output::row(
        "Flexible commitments",
        formatter.format_amount(result.flexible_commitments),
    );
    output::row(
        "Projected end balance",
        formatter.format_amount(result.projected_end_balance),
    );
    output::row(
        "Average daily spend",
        formatter.format_amount(result.average_daily_variable_spend),
    );
    output::row("Autonomy", format!("{} days", result.autonomy_days));
    if let Some(low) = &result.bottleneck {
        output::row(
            "Lowest point",
            format!(
                "{} on {}",
                formatter.format_amount(low.bottleneck_balance),
                low.bottleneck_day
            ),
        );
    }

    for alert in &result.alerts {
        output::alert(alert.severity, &alert.message);
    }
    for warning in &result.warnings {
        output::warning(warning);
    }
}

fn cmd_timeline(context: &CliContext, args: &[String]) -> Result<(), HearthError> {
    let household = required(args, 0, "household")?;
    let month = parse_month(required(args, 1, "YYYY-MM")?)?;

    let dashboard = context.dashboard()?;
    let timeline = dashboard.timeline(household, month)?;
    if context.flags.json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    let formatter = CodeCurrencyFormatter::new(dashboard.config().currency.clone());
    output::section(format!("Timeline: {household} {month}"));
    print_timeline(&timeline, &formatter);
    Ok(())
}

fn print_timeline(timeline: &Timeline, formatter: &dyn CurrencyFormatter) {
    output::row("Opening balance", formatter.format_amount(timeline.opening_balance));
    for entry in timeline.entries.iter().filter(|entry| entry.has_events()) {
        println!(
            "{}  +{:>12}  -{:>12}  = {}",
            entry.date,
            formatter.format_amount(entry.incomes),
            formatter.format_amount(entry.expenses),
            formatter.format_amount(entry.running_balance)
        );
        for event in &entry.events {
            let marker = if event.is_projected { "planned" } else { "done" };
            let category = if event.category.is_empty() {
                "uncategorized"
            } else {
                event.category.as_str()
            };
            println!(
                "    {:<8} {:<7} {:>14}  {category}",
                event.kind.to_string(),
                marker,
                formatter.format_amount(event.amount)
            );
        }
    }
    output::separator();
    output::row("Closing balance", formatter.format_amount(timeline.closing_balance()));
    for warning in &timeline.warnings {
        output::warning(warning);
    }
}

/// Chart series are always emitted as JSON; they feed a plotting front end.
fn cmd_chart(context: &CliContext, args: &[String]) -> Result<(), HearthError> {
    let household = required(args, 0, "household")?;
    let month = parse_month(required(args, 1, "YYYY-MM")?)?;
    let today = parse_today(args.get(2), context.clock.as_ref())?;

    let series = context.dashboard()?.chart(household, month, today)?;
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}

fn cmd_config(context: &CliContext, args: &[String]) -> Result<(), HearthError> {
    let action = required(args, 0, "action")?;
    let manager = &context.config_manager;

    let updated = match action {
        "show" => {
            let config = manager.load()?;
            print_config(context, &config)?;
            return Ok(());
        }
        "set-reserve" => {
            let kind = required(args, 1, "fixed|percentage")?;
            let value = parse_amount(required(args, 2, "value")?)?;
            let policy = match kind {
                "fixed" => ReservePolicy::fixed(value),
                "percentage" => ReservePolicy::percentage(value),
                other => {
                    return Err(HearthError::Usage(format!(
                        "reserve kind must be `fixed` or `percentage`, got `{other}`"
                    )))
                }
            };
            manager.update(|config| config.reserve = policy)?
        }
        "set-weekend-weight" => {
            let value = parse_amount(required(args, 1, "value")?)?;
            manager.update(|config| config.weekend_weight = value)?
        }
        "set-reference-income" => {
            let value = parse_amount(required(args, 1, "value")?)?;
            manager.update(|config| config.reference_income = value)?
        }
        other => {
            return Err(HearthError::Usage(format!(
                "unknown config action `{other}`"
            )))
        }
    };

    output::success(format!(
        "Saved settings to {}",
        manager.config_path().display()
    ));
    print_config(context, &updated)
}

fn print_config(context: &CliContext, config: &Config) -> Result<(), HearthError> {
    if context.flags.json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }
    output::section("Settings");
    output::row("Currency", &config.currency);
    output::row("Locale", &config.locale);
    output::row(
        "Reserve",
        format!("{} {}", config.reserve.kind, config.reserve.value),
    );
    output::row("Reference income", config.reference_income);
    output::row("Weekend weight", config.weekend_weight);
    output::row("Ledgers", context.ledger_root(config).display());
    Ok(())
}

fn cmd_version(context: &CliContext) -> Result<(), HearthError> {
    let meta = build_info::current();
    if context.flags.json {
        let rows: serde_json::Map<String, serde_json::Value> = meta
            .rows()
            .iter()
            .map(|(label, value)| (label.to_lowercase(), serde_json::Value::from(*value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    output::section(format!("Hearth {}", meta.version));
    for (label, value) in meta.rows() {
        output::row(label, value);
    }
    Ok(())
}
