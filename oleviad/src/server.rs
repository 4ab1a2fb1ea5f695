use std::sync::Arc;

use futures::{SinkExt, TryStreamExt};
use log::{error, info};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio_util::codec::{Framed, LinesCodec};

use crate::{Dispatcher, Error, Session};

/// Longest command line accepted from a client.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Runs one session per line-oriented client connection until the client
/// disconnects or sends `quit`.
pub async fn handle_client(
    dispatcher: &Dispatcher,
    stream: TcpStream,
    shutdown: &Notify,
) -> Result<(), Error> {
    let mut lines = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let mut session = Session::new();

    while let Some(line) = lines.try_next().await? {
        let outcome = dispatcher.dispatch(&mut session, line.trim()).await;
        lines.send(outcome.text()).await?;

        if outcome.is_quit() {
            shutdown.notify_one();
            break;
        }
    }

    Ok(())
}

/// Accepts clients until one of them sends `quit`.
pub async fn serve(listener: TcpListener, dispatcher: Dispatcher) -> Result<(), Error> {
    let dispatcher = Arc::new(dispatcher);
    let shutdown = Arc::new(Notify::new());

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("quit requested, shutting down");
                return Ok(());
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    info!("accepted {}", addr);

                    let dispatcher = Arc::clone(&dispatcher);
                    let shutdown = Arc::clone(&shutdown);
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(&dispatcher, stream, &shutdown).await {
                            error!("handle_client {}: {}", addr, e);
                        }
                        info!("closed {}", addr);
                    });
                }
                Err(e) => error!("listener error: {}", e),
            },
        }
    }
}
