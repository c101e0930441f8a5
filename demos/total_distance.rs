//! Total distance across all of a user's public activities.
//!
//! Run with: cargo run --example total_distance

use runkeeper_client::User;

fn main() -> runkeeper_client::Result<()> {
    let user = User::new("bnmrrs");

    let mut total_distance = 0.0;
    for activity in user.activities()? {
        println!(
            "{}  {}  {:.2}km",
            activity.id(),
            activity.activity_type(),
            activity.distance_km()
        );
        total_distance += activity.distance_km();
    }

    println!("{total_distance:.0}km");
    Ok(())
}
