//! Login, registration and session commands.

use clap::Args;
use cronos_core::notify::Notice;
use cronos_core::registration::RegistrationForm;
use cronos_core::session::Session;
use cronos_sdk::objects::{LoginRequest, Role};

use super::CliError;
use crate::state::AppState;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    role: Role,
    #[arg(long)]
    email: String,
    #[arg(long, env = "CRONOS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    role: Role,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "CRONOS_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    phone: String,
    /// Required for konsumen and petambak
    #[arg(long)]
    address: Option<String>,
    /// Required for logistik
    #[arg(long)]
    vehicle_type: Option<String>,
    /// Required for logistik
    #[arg(long)]
    license_plate: Option<String>,
}

pub async fn login(state: &AppState, args: LoginArgs) -> Result<(), CliError> {
    let request = LoginRequest {
        email: args.email.trim().to_owned(),
        password: args.password,
    };
    let session = Session::login(&state.client(), args.role, &request).await?;
    state.sessions.save(&session)?;
    state.notifier.notify(Notice::success(format!(
        "Selamat datang, {} ({})",
        session.user.name, session.role
    )));
    Ok(())
}

pub async fn register(state: &AppState, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegistrationForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        phone: args.phone,
        address: args.address,
        vehicle_type: args.vehicle_type,
        license_plate: args.license_plate,
    };
    let request = form.validate(args.role)?;
    let session = Session::register(&state.client(), &request).await?;
    state.sessions.save(&session)?;
    state.notifier.notify(Notice::success(format!(
        "Akun {} terdaftar sebagai {}",
        session.user.email, session.role
    )));
    Ok(())
}

pub fn logout(state: &AppState) -> Result<(), CliError> {
    if state.sessions.clear()? {
        state.notifier.notify(Notice::info("Berhasil logout"));
    } else {
        state.notifier.notify(Notice::info("Belum login"));
    }
    Ok(())
}

pub async fn whoami(state: &AppState) -> Result<(), CliError> {
    let (session, client) = state.signed_in()?;
    let profile = client.profile().await?;
    println!("{} <{}>", profile.name, profile.email);
    println!("role   : {}", session.role);
    println!("room   : {}", session.participant().room());
    if let Some(status) = profile.status {
        println!("status : {status:?}");
    }
    if let Some(address) = profile.address {
        println!("alamat : {address}");
    }
    Ok(())
}
