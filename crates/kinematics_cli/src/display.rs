//! Telemetry formatting.
//!
//! Units follow the readouts of the animation this tool replaces: seconds,
//! metres per second and metres, three decimals each.

use kinematics::{Distance, TelemetrySnapshot};

/// Formats seconds as `"1.234 s"`.
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.3} s")
}

/// Formats a speed as `"1.234 m/s"`.
pub fn format_speed(speed: f64) -> String {
    format!("{speed:.3} m/s")
}

/// Formats a distance as `"1.234 m"`.
pub fn format_meters(meters: f64) -> String {
    format!("{meters:.3} m")
}

/// Control values shown next to the free-fall readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlReadout {
    /// Displayed mass in kg.
    pub mass: u32,
    /// Restitution coefficient.
    pub bounce: f64,
}

/// One telemetry line.
///
/// Path-length snapshots print a single distance plus the control readout
/// when one is given; displacement snapshots print X and Y separately.
pub fn telemetry_line(snapshot: &TelemetrySnapshot, controls: Option<ControlReadout>) -> String {
    let mut line = format!(
        "Time = {} | Velocity = {}",
        format_seconds(snapshot.elapsed_secs),
        format_speed(snapshot.speed)
    );

    match snapshot.distance {
        Distance::Path { length } => {
            line.push_str(&format!(" | Distance = {}", format_meters(length)));
        }
        Distance::Displacement { x, y } => {
            line.push_str(&format!(
                " | X Distance = {} | Y Distance = {}",
                format_meters(x),
                format_meters(y)
            ));
        }
    }

    if let Some(controls) = controls {
        line.push_str(&format!(
            " | Mass: {} kg | Bouncyness: {:.2}",
            controls.mass, controls.bounce
        ));
    }
    line
}
