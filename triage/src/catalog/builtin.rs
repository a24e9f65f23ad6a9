//! The shipped knowledge base
//!
//! Each condition lives in its own function so it can be exercised without
//! going through a catalog.

use crate::rule::Confidence;
use crate::{Condition, Rule};

/// `high_temp AND (frequent_crashes OR loud_fan)`
pub fn overheating() -> Condition {
    Condition::all([
        Condition::flag("high_temp"),
        Condition::any([
            Condition::flag("frequent_crashes"),
            Condition::flag("loud_fan"),
        ]),
    ])
}

/// `slow_pc AND high_ram AND disk_full`
pub fn performance() -> Condition {
    Condition::all([
        Condition::flag("slow_pc"),
        Condition::flag("high_ram"),
        Condition::flag("disk_full"),
    ])
}

/// `no_internet AND (wifi_connected OR net_state == "wired") AND NOT ip_valid`
pub fn network_configuration() -> Condition {
    Condition::all([
        Condition::flag("no_internet"),
        Condition::any([
            Condition::flag("wifi_connected"),
            Condition::equals("net_state", "wired"),
        ]),
        Condition::not(Condition::flag("ip_valid")),
    ])
}

/// `boot_loop AND recent_driver_install`
pub fn driver_boot_loop() -> Condition {
    Condition::all([
        Condition::flag("boot_loop"),
        Condition::flag("recent_driver_install"),
    ])
}

/// `blue_screen`
pub fn blue_screen() -> Condition {
    Condition::flag("blue_screen")
}

fn rule(
    id: &str,
    name: &str,
    condition: Condition,
    cause: &str,
    explanation: &str,
    recommendations: [&str; 3],
    confidence: f64,
) -> Rule {
    Rule {
        id: id.to_string(),
        name: name.to_string(),
        condition,
        cause: cause.to_string(),
        explanation: explanation.to_string(),
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        confidence: Confidence::known(confidence),
    }
}

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        rule(
            "R1",
            "Overheating Issue",
            overheating(),
            "Overheating Detected",
            "The system temperature is very high which can cause crashes and instability.",
            [
                "Turn off the PC and let it cool down.",
                "Clean CPU fan and heatsink.",
                "Improve airflow inside the case.",
            ],
            0.90,
        ),
        rule(
            "R2",
            "Low Storage and High RAM Usage",
            performance(),
            "Performance Issue",
            "High RAM usage combined with low disk space causes slow performance.",
            [
                "Free up disk space.",
                "Close unnecessary background applications.",
                "Consider upgrading RAM.",
            ],
            0.85,
        ),
        rule(
            "R3",
            "Network IP/DNS Issue",
            network_configuration(),
            "Network Configuration Issue",
            "The device is connected to network but does not have a valid IP address.",
            [
                "Renew IP address.",
                "Flush DNS cache.",
                "Restart the router.",
            ],
            0.80,
        ),
        rule(
            "R4",
            "Driver Boot Loop",
            driver_boot_loop(),
            "Driver Compatibility Issue",
            "A recently installed driver is causing the system to enter a boot loop.",
            [
                "Boot into Safe Mode.",
                "Rollback or uninstall the problematic driver.",
                "Use System Restore.",
            ],
            0.88,
        ),
        rule(
            "R5",
            "Blue Screen Error",
            blue_screen(),
            "Blue Screen of Death (BSOD)",
            "A critical system error occurred, possibly related to hardware or drivers.",
            [
                "Note the error code on the blue screen.",
                "Run memory and disk diagnostics.",
                "Update system drivers.",
            ],
            0.82,
        ),
    ]
}
