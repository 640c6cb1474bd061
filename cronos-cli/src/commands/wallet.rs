//! Escrow wallet and withdrawal requests.

use clap::Subcommand;
use cronos_core::notify::Notice;
use cronos_sdk::objects::{NewWithdrawal, Role, TransactionType, WithdrawAction, Withdrawal};
use rust_decimal::Decimal;

use super::{CliError, Decision, rupiah};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Balance and recent transactions
    Show,
    /// Withdrawal requests (all of them for admin)
    Withdrawals,
    /// Request a withdrawal to a bank account
    Withdraw {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        bank_account: String,
    },
    /// Approve or reject a withdrawal (admin)
    Process {
        withdrawal_id: i64,
        #[arg(value_enum)]
        action: Decision,
    },
}

impl From<Decision> for WithdrawAction {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => WithdrawAction::Approve,
            Decision::Reject => WithdrawAction::Reject,
        }
    }
}

fn print_withdrawal(withdrawal: &Withdrawal) {
    println!(
        "#{:<5} {:>14} {:<9} {}",
        withdrawal.id,
        rupiah(withdrawal.amount),
        withdrawal.status.to_string(),
        withdrawal.bank_account
    );
}

pub async fn run(state: &AppState, cmd: WalletCommand) -> Result<(), CliError> {
    match cmd {
        WalletCommand::Show => {
            let (_, client) = state.signed_in()?;
            let wallet = client.my_wallet().await?;
            println!("Saldo: {}", rupiah(wallet.balance));
            for tx in &wallet.transactions {
                let sign = match tx.kind {
                    TransactionType::Credit => '+',
                    TransactionType::Debit => '-',
                };
                println!(
                    "  {sign}{:>14} {:?} {}",
                    rupiah(tx.amount),
                    tx.source,
                    tx.reference_id.as_deref().unwrap_or("")
                );
            }
        }
        WalletCommand::Withdrawals => {
            let (_, client) = state.signed_in()?;
            let withdrawals = client.withdrawals().await?;
            if withdrawals.is_empty() {
                println!("Belum ada penarikan");
            }
            withdrawals.iter().for_each(print_withdrawal);
        }
        WalletCommand::Withdraw {
            amount,
            bank_account,
        } => {
            if amount <= Decimal::ZERO {
                return Err(CliError::Invalid("Jumlah penarikan harus lebih dari 0".to_string()));
            }
            let bank_account = bank_account.trim();
            if bank_account.is_empty() {
                return Err(CliError::Invalid("Rekening bank wajib diisi".to_string()));
            }
            let (_, client) = state.signed_in()?;
            let withdrawal = client
                .request_withdrawal(&NewWithdrawal {
                    amount,
                    bank_account: bank_account.to_owned(),
                })
                .await?;
            state.notifier.notify(Notice::success(format!(
                "Penarikan #{} diajukan",
                withdrawal.id
            )));
            print_withdrawal(&withdrawal);
        }
        WalletCommand::Process {
            withdrawal_id,
            action,
        } => {
            let (_, client) = state.signed_in_as(Role::Admin)?;
            let withdrawal = client
                .process_withdrawal(withdrawal_id, action.into())
                .await?;
            state.notifier.notify(Notice::success(format!(
                "Penarikan #{} {}",
                withdrawal.id, withdrawal.status
            )));
        }
    }
    Ok(())
}
