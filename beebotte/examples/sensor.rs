//! Example pushing a few sensor readings and reading them back.
//!
//! Credentials come from `BEEBOTTE_ACCESS_KEY` and `BEEBOTTE_SECRET_KEY`.

use beebotte::{ClientAuth, PublishRecord, ReadOptions, Source, WriteRecord};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let client = beebotte::default_client()?;
    let temp = client.resource("dev", "temp");

    temp.write(21.5, None).await?;
    client
        .write_bulk(
            "dev",
            vec![
                WriteRecord::new("temp", 21.7),
                WriteRecord::new("humidity", 48),
            ],
        )
        .await?;
    client
        .publish_bulk("dev", vec![PublishRecord::new("alarm", "door open").with_source("hall")])
        .await?;

    let recent = temp.recent_val().await?;
    println!("recent temperature: {} at {}", recent.data, recent.ts);

    let stats = temp
        .read(
            &ReadOptions::new()
                .with_source(Source::HourStats)
                .with_time_range("1day"),
            None,
        )
        .await?;
    for point in stats {
        println!("{}", point.to_record(None));
    }

    let token = client
        .sign_client_auth(&ClientAuth::new("sid1", "dev").with_ttl(60).with_read(true))
        .await?;
    println!("subscriber token: {token}");

    Ok(())
}
