use moon::*;
use shared::page;

async fn frontend() -> Frontend {
    Frontend::new().title(page::TITLE)
}

// The page never sends messages to the server.
async fn up_msg_handler(_: UpMsgRequest<()>) {}

#[moon::main]
async fn main() -> std::io::Result<()> {
    start(frontend, up_msg_handler, |_| {}).await
}
