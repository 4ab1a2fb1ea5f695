use clap::Parser;
use log::{error, info};
use oleviad::*;

async fn run(config: Config) -> Result<(), Error> {
    let transport = olevia::SerialTransport::open(&config.serial_port, config.baud_rate)?;
    let device = Device::new(transport, config.link_settings());
    info!("opened {}", device.description());

    let mut listenfd = listenfd::ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            tokio::net::TcpListener::from_std(listener)?
        }
        None => tokio::net::TcpListener::bind(config.listen).await?,
    };
    info!("listening on {}", listener.local_addr()?);

    serve(listener, Dispatcher::new(device)).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Config::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
