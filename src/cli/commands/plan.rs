use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rules::RuleSet;
use crate::core::simulator;
use crate::db::pool::DbPool;
use crate::db::queries::{find_driver, load_timeline};
use crate::errors::{AppError, AppResult};
use crate::models::trip::{TripRequest, WaypointKind};
use crate::ui::messages::{header, success, warning};
use crate::utils::formatting::fmt_hours;
use crate::utils::table::Table;
use crate::utils::time::{fmt_ts, now};

use super::status::print_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Plan {
        driver,
        from,
        pickup,
        dropoff,
        hours,
        json,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let driver = find_driver(&pool.conn, driver)?;

        let request = TripRequest {
            current_location: from.clone(),
            pickup_location: pickup.clone(),
            dropoff_location: dropoff.clone(),
            estimated_driving_hours: *hours,
        };

        // One atomic snapshot of the timeline; the simulator never writes.
        let timeline = load_timeline(&pool.conn, driver.id)?;
        let rules = RuleSet::default();

        let plan = simulator::plan_trip(
            &timeline,
            &rules,
            driver.id,
            &request,
            cfg.avg_speed_mph,
            now(),
        )?;

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan).map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        header(format!(
            "Trip plan — {}: {} → {} → {}",
            driver.name, from, pickup, dropoff
        ));

        if plan.can_complete_trip {
            success(format!(
                "Trip is feasible: {} driving, {} mi estimated.",
                fmt_hours(plan.route.estimated_driving_time),
                plan.route.total_distance_miles
            ));
        } else {
            warning("Trip cannot be completed under current hours-of-service budgets.");
            for reason in &plan.reasons {
                for line in textwrap::wrap(reason, 70) {
                    println!("  - {}", line);
                }
            }
        }

        let mut table = Table::new(&["ETA", "STOP", "LOCATION", "DRIVE LEFT", "DUTY LEFT"]);
        for wp in &plan.route.waypoints {
            table.add_row(vec![
                fmt_ts(wp.eta),
                kind_label(wp.kind).to_string(),
                wp.name.clone(),
                fmt_hours(wp.arrival_state.remaining_drive_time),
                fmt_hours(wp.arrival_state.remaining_duty_time),
            ]);
        }
        print!("{}", table.render());

        println!();
        println!("Projected status after the trip:");
        print_state(&plan.hos_status);
    }
    Ok(())
}

fn kind_label(kind: WaypointKind) -> &'static str {
    match kind {
        WaypointKind::Origin => "origin",
        WaypointKind::Pickup => "pickup",
        WaypointKind::Rest => "rest",
        WaypointKind::Dropoff => "dropoff",
    }
}
