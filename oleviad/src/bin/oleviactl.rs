use clap::Parser;
use futures::{SinkExt, TryStreamExt};
use tokio_util::codec::{Framed, LinesCodec};

#[derive(Debug, clap::Parser)]
#[command(name = "oleviactl", about = "Send commands to oleviad")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:53535")]
    addr: String,

    /// Keywords such as `poweron`, `volumeup` or `readvolumevalue`.
    #[arg(required = true)]
    commands: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let stream = tokio::net::TcpStream::connect(&args.addr)
        .await
        .expect("can't connect to oleviad");
    let mut lines = Framed::new(stream, LinesCodec::new());

    for cmd in &args.commands {
        lines.send(cmd.as_str()).await.expect("can't send command");

        match lines.try_next().await.expect("can't read reply") {
            Some(reply) => println!("{}", reply),
            None => {
                eprintln!("connection closed by oleviad");
                std::process::exit(1);
            }
        }
    }
}
