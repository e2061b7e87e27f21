use chrono::Utc;
use climate_profile::{
    compare_to_season_norm, fetch_current_temperatures, ClimateError, EnrichedFrameFilterExt,
    ObservationFrame, OpenWeatherClient, Season, TemperatureAnalyzer,
};
use polars::prelude::IntoLazy;
use std::env;
use std::path::PathBuf;

// Usage: analyze_csv <file.csv> <city> [api-key]
#[tokio::main]
async fn main() -> Result<(), ClimateError> {
    configure_polars_display();
    let mut args = env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "temperature_data.csv".to_string()));
    let loaded = ObservationFrame::from_path(&path).await?;
    println!("{}", loaded.describe()?);

    let cities = loaded.cities();
    let Some(city) = args.next().or_else(|| cities.first().cloned()) else {
        println!("No cities in {}", path.display());
        return Ok(());
    };

    let analysis = match TemperatureAnalyzer::default()
        .analyze()
        .observations(loaded.observations())
        .city(&city)
        .maybe_period(loaded.date_bounds())
        .call()
    {
        Ok(analysis) => analysis,
        Err(e) if e.is_empty_result() => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match &analysis.trend {
        Ok(trend) => println!("The trend is {} with coefficient {}", trend.direction(), trend.slope),
        Err(e) => println!("{}", e),
    }
    println!("{}", analysis.city_profile_frame()?);
    println!("{}", analysis.season_profile_frame()?);
    println!(
        "Anomalies:\n{}",
        analysis.series_frame()?.lazy().filter_anomalies().collect()?
    );

    let Some(api_key) = args.next() else {
        return Ok(());
    };
    let client = OpenWeatherClient::builder().build()?;
    let readings = fetch_current_temperatures(&client, &api_key, &cities).await;
    if readings.authentication_failed() {
        println!("Invalid API key");
        return Ok(());
    }
    if let Some(current) = readings.temperature(&city) {
        println!("Current temperature in {} is {} degrees Celsius", city, current);
        let season = Season::from_date(Utc::now().date_naive());
        match compare_to_season_norm(&analysis.season_profiles, season, current) {
            Some(comparison) => println!("Compared to the {} norm: {:?}", season, comparison),
            None => println!("No {} profile to compare against", season),
        }
    }
    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
