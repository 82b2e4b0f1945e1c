//! Headless driver client: logs in, prints today's orders, and can push a
//! single status change. Handy for poking at a server without the GUI.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    auth::AuthClient, AccessTokenProvider, DriverApiClient, DriverGateway, SessionTokenStore,
};
use shared::domain::{format_date_id, OrderId, OrderStatus};

#[derive(Parser, Debug)]
#[command(name = "dashboard_cli")]
struct Args {
    #[arg(long)]
    server_url: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Update this order after listing; requires --status.
    #[arg(long, requires = "status")]
    order_id: Option<String>,
    /// New status: pending, penjemputan, pencucian, selesai, batal, kesalahan.
    #[arg(long)]
    status: Option<OrderStatus>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let session = Arc::new(SessionTokenStore::new());
    let auth = AuthClient::new(&args.server_url)?;
    let tokens = auth.login(&args.email, &args.password).await?;
    session.set(tokens);

    let gateway = DriverApiClient::new(
        &args.server_url,
        Arc::clone(&session) as Arc<dyn AccessTokenProvider>,
    )?;

    let profile = gateway.driver_profile().await?;
    println!("Driver: {} <{}>", profile.name, profile.email);

    let orders = gateway.list_orders().await?;
    println!("{} pesanan hari ini", orders.len());
    for (index, order) in orders.iter().enumerate() {
        println!(
            "{}. {} - {} - {} [{}]",
            index + 1,
            order.customer.name,
            order.status,
            format_date_id(&order.created_at),
            order.id
        );
    }

    if let (Some(order_id), Some(status)) = (args.order_id, args.status) {
        let order_id = OrderId(order_id);
        gateway.update_order_status(&order_id, status).await?;
        println!("status order {order_id} diubah menjadi {status}");
    }

    if let Some(refresh_token) = session.refresh_token() {
        auth.logout(&refresh_token).await?;
    }
    Ok(())
}
