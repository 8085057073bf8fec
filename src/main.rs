use std::num::NonZeroU32;

use vincenty_geodesy::{GeodesyEngine, KnownEllipsoid, Result, ServerConfig, Waypoint};

fn main() -> Result<()> {
    println!("vincenty-geodesy - Geodesic Info\n");

    let config = ServerConfig::load()?;
    let engine = config.engine.build_engine()?;

    println!("Ellipsoid: {:?}", engine.ellipsoid());
    match engine.iteration_cap() {
        Some(cap) => println!("Iteration cap: {}", cap),
        None => println!("Iteration cap: unbounded"),
    }

    let flinders_peak = Waypoint::new("Flinders Peak", -37.951_033_42, 144.424_867_89);
    let buninyong = Waypoint::new("Buninyong", -37.652_821_14, 143.926_495_51);

    println!("\n--- Inverse problem ---");
    let solution = engine.inverse(&flinders_peak, &buninyong);
    println!("{} -> {}", flinders_peak.name, buninyong.name);
    println!("  Distance:        {:.3} m", solution.distance);
    println!("  Initial bearing: {:.5}°", solution.initial_bearing);
    println!("  Final bearing:   {:.5}°", solution.final_bearing);
    println!("  Reverse bearing: {:.5}°", solution.reverse_bearing());
    println!("  Iterations:      {} (converged: {})", solution.iterations, solution.converged);

    println!("\n--- Direct problem ---");
    let direct = engine.direct(&flinders_peak, solution.initial_bearing, solution.distance);
    println!(
        "  Destination: ({:.8}, {:.8})",
        direct.destination.latitude, direct.destination.longitude
    );
    println!("  Final bearing: {:.5}°", direct.final_bearing);

    println!("\n--- Iteration cap of 1 ---");
    let capped = GeodesyEngine::new(*engine.ellipsoid()).with_iteration_cap(NonZeroU32::new(1));
    let rough = capped.inverse(&flinders_peak, &buninyong);
    println!(
        "  Distance: {:.3} m (off by {:.3} m, converged: {})",
        rough.distance,
        rough.distance - solution.distance,
        rough.converged
    );

    println!("\n--- City pairs ---");
    let cities = vec![
        Waypoint::new("Edmonton, AB", 53.5461, -113.4938),
        Waypoint::new("Vancouver, BC", 49.2827, -123.1207),
        Waypoint::new("Toronto, ON", 43.6532, -79.3832),
        Waypoint::new("London, UK", 51.5074, -0.1278),
        Waypoint::new("Sydney, AU", -33.8688, 151.2093),
        Waypoint::new("Quito, EC", -0.1807, -78.4678),
    ];

    let pairs: Vec<(Waypoint, Waypoint)> = cities
        .iter()
        .zip(cities.iter().skip(1))
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect();

    for ((from, to), solution) in pairs.iter().zip(engine.inverse_many(&pairs)) {
        println!(
            "  {:<14} -> {:<14} {:>14.3} km  bearing {:>8.3}°",
            from.name,
            to.name,
            solution.distance / 1000.0,
            solution.initial_bearing
        );
    }

    println!("\n--- Same line on other ellipsoids ---");
    for known in [KnownEllipsoid::GRS80, KnownEllipsoid::Airy1830, KnownEllipsoid::Clarke1866] {
        let other = GeodesyEngine::new(known.ellipsoid());
        println!(
            "  {:<20} {:.3} m",
            known.name(),
            other.distance(&flinders_peak, &buninyong)
        );
    }

    Ok(())
}
