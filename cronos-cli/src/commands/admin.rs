//! Admin verification queue, change requests and the PDF report.

use std::path::PathBuf;

use clap::Subcommand;
use cronos_core::notify::Notice;
use cronos_sdk::client::ADMIN_REPORT_FILE_NAME;
use cronos_sdk::objects::{ChangeRequestAction, Role, VerifyAction, VerifyUserRequest};

use super::{CliError, Decision};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Accounts waiting for verification
    PendingUsers,
    /// Approve or reject an account
    Verify {
        user_id: i64,
        #[arg(long)]
        role: Role,
        #[arg(value_enum)]
        action: Decision,
    },
    /// Product and price change requests
    ChangeRequests,
    /// Approve or reject a change request
    Review {
        request_id: i64,
        #[arg(value_enum)]
        action: Decision,
    },
    /// Download the admin PDF report
    Report {
        /// Output file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn run(state: &AppState, cmd: AdminCommand) -> Result<(), CliError> {
    let (_, client) = state.signed_in_as(Role::Admin)?;
    match cmd {
        AdminCommand::PendingUsers => {
            let users = client.pending_users().await?;
            if users.is_empty() {
                println!("Tidak ada akun menunggu verifikasi");
            }
            for user in users {
                println!(
                    "#{:<5} {:<9} {:<24} {}",
                    user.id,
                    user.role.to_string(),
                    user.name,
                    user.email
                );
            }
        }
        AdminCommand::Verify {
            user_id,
            role,
            action,
        } => {
            let action = match action {
                Decision::Approve => VerifyAction::Approve,
                Decision::Reject => VerifyAction::Reject,
            };
            let ack = client
                .verify_user(&VerifyUserRequest {
                    user_id,
                    role,
                    action,
                })
                .await?;
            state.notifier.notify(Notice::success(
                ack.message
                    .unwrap_or_else(|| format!("Akun #{user_id} diperbarui")),
            ));
        }
        AdminCommand::ChangeRequests => {
            for request in client.change_requests().await? {
                let requester = match (request.requester_role, request.requester_id) {
                    (Some(role), Some(id)) => format!("{role}:{id}"),
                    _ => "-".to_string(),
                };
                println!(
                    "#{:<5} {:?} {:<14} {} {}",
                    request.id,
                    request.status,
                    requester,
                    request.target_type.as_deref().unwrap_or("-"),
                    request.payload
                );
            }
        }
        AdminCommand::Review { request_id, action } => {
            let action = match action {
                Decision::Approve => ChangeRequestAction::Approve,
                Decision::Reject => ChangeRequestAction::Reject,
            };
            let ack = client.process_change_request(request_id, action).await?;
            state.notifier.notify(Notice::success(
                ack.message
                    .unwrap_or_else(|| format!("Permintaan #{request_id} diproses")),
            ));
        }
        AdminCommand::Report { out } => {
            let bytes = client.admin_report().await?;
            let path = out.unwrap_or_else(|| PathBuf::from(ADMIN_REPORT_FILE_NAME));
            tokio::fs::write(&path, &bytes).await?;
            state.notifier.notify(Notice::success(format!(
                "Laporan disimpan di {}",
                path.display()
            )));
        }
    }
    Ok(())
}
