use thiserror::Error;

use super::rpc::{ChainClient, RpcError};
use crate::components::{sign_and_send_transaction, WalletError};

pub const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";

// System program instruction index for Transfer.
const TRANSFER_INSTRUCTION: u32 = 2;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid address {0}")]
    BadAddress(String),
    #[error("invalid blockhash")]
    BadBlockhash,
}

#[derive(Debug, Error)]
pub enum PlantError {
    #[error("wallet: {0}")]
    Wallet(#[from] WalletError),
    #[error("chain: {0}")]
    Chain(#[from] RpcError),
    #[error("encoding: {0}")]
    Encode(#[from] EncodeError),
}

/// Submit one symbolic tree: a minimal self-transfer signed by the
/// connected wallet, awaited to `confirmed` commitment.
///
/// Returns the transaction signature. The counter update is the caller's
/// business; this only talks to the chain.
pub async fn plant_transaction(
    chain: &ChainClient,
    owner: &str,
    lamports: u64,
) -> Result<String, PlantError> {
    let blockhash = chain.latest_blockhash().await?;
    let tx_bytes = build_transfer_bytes(owner, owner, lamports, &blockhash)?;

    let signature = sign_and_send_transaction(&tx_bytes).await?;
    tracing::info!("tree transaction submitted: {signature}");

    chain.confirm_signature(&signature).await?;
    Ok(signature)
}

/// Build a legacy Solana transfer transaction as raw bytes, unsigned.
///
/// Legacy wire format:
/// Message header: [num_required_signatures, num_readonly_signed, num_readonly_unsigned]
/// Account addresses: [compact-u16 count][...32-byte pubkeys]
/// Recent blockhash: [32 bytes]
/// Instructions: [compact-u16 count][...instructions]
/// Each instruction: [program_id_index][compact-u16 account_count][...account_indices][compact-u16 data_len][...data]
pub fn build_transfer_bytes(
    from: &str,
    to: &str,
    lamports: u64,
    blockhash: &str,
) -> Result<Vec<u8>, EncodeError> {
    // Transfer account order: funding account (signer, writable), then the
    // recipient (writable). A self-transfer collapses to one entry.
    let accounts = [(from, true, true), (to, true, false)];

    // Deduplicate accounts and build lookup. Fee payer is always first.
    let mut unique_accounts: Vec<&str> = vec![from];
    let mut account_metas: Vec<(usize, bool, bool)> = Vec::new();

    for (pubkey, writable, signer) in accounts {
        if let Some(idx) = unique_accounts.iter().position(|a| *a == pubkey) {
            account_metas.push((idx, writable, signer));
        } else {
            account_metas.push((unique_accounts.len(), writable, signer));
            unique_accounts.push(pubkey);
        }
    }

    let program_idx = unique_accounts.len();
    unique_accounts.push(SYSTEM_PROGRAM);

    // Only the fee payer signs; the program id is the one readonly entry.
    let num_signers = 1u8;
    let num_readonly_signed = 0u8;
    let num_readonly_unsigned = unique_accounts
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            *i > 0
                && !account_metas
                    .iter()
                    .any(|(idx, writable, signer)| idx == i && (*writable || *signer))
        })
        .count() as u8;

    // Instruction data: [instruction index (4 bytes)] [lamports (8 bytes)]
    let mut ix_data = Vec::with_capacity(12);
    ix_data.extend_from_slice(&TRANSFER_INSTRUCTION.to_le_bytes());
    ix_data.extend_from_slice(&lamports.to_le_bytes());

    let mut message = Vec::new();

    // Header
    message.push(num_signers);
    message.push(num_readonly_signed);
    message.push(num_readonly_unsigned);

    // Account addresses (compact array)
    message.extend(compact_u16(unique_accounts.len() as u16));
    for account in &unique_accounts {
        let bytes = bs58::decode(account)
            .into_vec()
            .map_err(|_| EncodeError::BadAddress(account.to_string()))?;
        if bytes.len() != 32 {
            return Err(EncodeError::BadAddress(account.to_string()));
        }
        message.extend(&bytes);
    }

    // Recent blockhash
    let blockhash_bytes = bs58::decode(blockhash)
        .into_vec()
        .map_err(|_| EncodeError::BadBlockhash)?;
    if blockhash_bytes.len() != 32 {
        return Err(EncodeError::BadBlockhash);
    }
    message.extend(&blockhash_bytes);

    // Instructions (1 instruction)
    message.extend(compact_u16(1));
    message.push(program_idx as u8);

    let ix_account_indices: Vec<u8> = account_metas.iter().map(|(idx, _, _)| *idx as u8).collect();
    message.extend(compact_u16(ix_account_indices.len() as u16));
    message.extend(&ix_account_indices);

    message.extend(compact_u16(ix_data.len() as u16));
    message.extend(&ix_data);

    // For unsigned transaction, prepend empty signature count
    let mut tx = Vec::with_capacity(1 + message.len());
    tx.push(0u8); // 0 signatures (wallet will add)
    tx.extend(&message);

    Ok(tx)
}

/// Encode u16 as Solana compact-u16 format
fn compact_u16(val: u16) -> Vec<u8> {
    if val < 0x80 {
        vec![val as u8]
    } else if val < 0x4000 {
        vec![(val & 0x7f) as u8 | 0x80, (val >> 7) as u8]
    } else {
        vec![
            (val & 0x7f) as u8 | 0x80,
            ((val >> 7) & 0x7f) as u8 | 0x80,
            (val >> 14) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> String {
        bs58::encode([byte; 32]).into_string()
    }

    #[test]
    fn self_transfer_serializes_to_expected_wire_bytes() {
        let owner = addr(7);
        let blockhash = addr(9);

        let tx = build_transfer_bytes(&owner, &owner, 1, &blockhash).unwrap();

        // 0 signatures; 1 signer, 0 readonly signed, 1 readonly unsigned
        // (the system program)
        assert_eq!(tx[0], 0);
        assert_eq!(&tx[1..4], &[1, 0, 1]);

        // Two unique accounts: the wallet once (self-transfer dedup), then
        // the system program.
        assert_eq!(tx[4], 2);
        assert_eq!(&tx[5..37], &[7u8; 32]);
        assert_eq!(&tx[37..69], &[0u8; 32]);

        assert_eq!(&tx[69..101], &[9u8; 32]);

        // One instruction against account index 1 (system program), with
        // the wallet appearing as both funding and recipient account.
        assert_eq!(tx[101], 1);
        assert_eq!(tx[102], 1);
        assert_eq!(tx[103], 2);
        assert_eq!(&tx[104..106], &[0, 0]);

        // Transfer instruction data: index 2, then 1 lamport.
        assert_eq!(tx[106], 12);
        assert_eq!(&tx[107..111], &[2, 0, 0, 0]);
        assert_eq!(&tx[111..119], &1u64.to_le_bytes());

        assert_eq!(tx.len(), 119);
    }

    #[test]
    fn distinct_recipient_keeps_three_accounts() {
        let from = addr(1);
        let to = addr(2);
        let blockhash = addr(3);

        let tx = build_transfer_bytes(&from, &to, 42, &blockhash).unwrap();

        assert_eq!(&tx[1..4], &[1, 0, 1]);
        assert_eq!(tx[4], 3);
        assert_eq!(&tx[5..37], &[1u8; 32]);
        assert_eq!(&tx[37..69], &[2u8; 32]);
        assert_eq!(&tx[69..101], &[0u8; 32]);

        // Instruction references from (0) and to (1), program at index 2.
        let ix = &tx[133..];
        assert_eq!(ix[0], 1); // instruction count
        assert_eq!(ix[1], 2); // program index
        assert_eq!(&ix[2..5], &[2, 0, 1]);
        assert_eq!(&tx[138..146], &[12, 2, 0, 0, 0, 42, 0, 0]);
    }

    #[test]
    fn lamports_land_in_instruction_data() {
        let owner = addr(5);
        let tx = build_transfer_bytes(&owner, &owner, 123_456_789, &addr(6)).unwrap();
        assert_eq!(&tx[111..119], &123_456_789u64.to_le_bytes());
    }

    #[test]
    fn rejects_malformed_addresses() {
        let blockhash = addr(1);
        assert!(matches!(
            build_transfer_bytes("not-base58!", "not-base58!", 1, &blockhash),
            Err(EncodeError::BadAddress(_))
        ));

        // Valid base58 but not 32 bytes.
        let short = bs58::encode([1u8; 4]).into_string();
        assert!(matches!(
            build_transfer_bytes(&short, &short, 1, &blockhash),
            Err(EncodeError::BadAddress(_))
        ));

        let owner = addr(2);
        assert!(matches!(
            build_transfer_bytes(&owner, &owner, 1, "bad hash"),
            Err(EncodeError::BadBlockhash)
        ));
    }

    #[test]
    fn compact_u16_boundaries() {
        assert_eq!(compact_u16(0), vec![0]);
        assert_eq!(compact_u16(1), vec![1]);
        assert_eq!(compact_u16(127), vec![127]);
        assert_eq!(compact_u16(128), vec![0x80, 1]);
        assert_eq!(compact_u16(16383), vec![0xff, 0x7f]);
        assert_eq!(compact_u16(16384), vec![0x80, 0x80, 1]);
    }
}
