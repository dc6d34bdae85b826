use crate::core::rules::RuleSet;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Print the rule constants the engine enforces, in plain language.
pub fn handle() -> AppResult<()> {
    let rules = RuleSet::default();

    header("Hours-of-service rules (interstate, property-carrying)");

    println!(
        "{}-hour driving limit    Maximum {} hours of driving inside one duty window.",
        rules.drive_limit_hours, rules.drive_limit_hours
    );
    println!(
        "{}-hour duty window      Driving must stop {} hours after coming on duty;\n                        off-duty time inside the window does not extend it.",
        rules.duty_window_hours, rules.duty_window_hours
    );
    println!(
        "30-minute break         Required after {} cumulative hours of driving.",
        rules.break_trigger_hours
    );
    println!(
        "{}-hour/{}-day rule       No more than {} on-duty hours in any {} consecutive days\n                        (continuously sliding window).",
        rules.weekly_limit_hours,
        rules.weekly_period_days,
        rules.weekly_limit_hours,
        rules.weekly_period_days
    );
    println!(
        "{}-hour reset            {} consecutive hours off duty (OFF/SB) open a new duty window.",
        rules.reset_hours, rules.reset_hours
    );

    Ok(())
}
