use isea3h_rs::{GridError, Isea3h};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), GridError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "isea3h_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lat = 49.410_935;
    let lon = 8.693_976;

    for resolution in [1, 5, 10] {
        let grid = Isea3h::new(resolution)?;
        println!("Resolution {resolution}");
        println!("  Hexagons: {}", grid.number_of_hexagon_cells());
        println!("  Pentagons: {}", grid.number_of_pentagon_cells());
        println!("  Hexagon area: {:.3} km²", grid.area_of_hexagon_cell() / 1e6);
        println!(
            "  Diameter on icosahedron: {:.3} km",
            grid.diameter_of_cell_on_icosahedron() / 1e3
        );

        let cell = grid.cell_for_location(lat, lon)?;
        println!("  Cell ID: {}", cell.id());
        println!("  Center: ({}, {})", cell.lat(), cell.lon());
    }

    let grid = Isea3h::new(8)?;
    let cells = grid.cells_for_bound(49.0, 50.0, 8.0, 9.5)?;
    println!("Cells around ({lat}, {lon}) at resolution 8: {}", cells.len());

    Ok(())
}
