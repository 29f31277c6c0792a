//! Transaction assembly and signing.

use nft_sim_types::{Coins, Fee, Request, SignDoc, SignedTransaction, DEFAULT_GEN_TX_GAS};

use super::account::SimAccount;

/// Build a single-signer transaction over `msgs` and sign it.
pub fn gen_tx(
    msgs: Vec<Request>,
    fee: Coins,
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    signer: &SimAccount,
) -> Result<SignedTransaction, bcs::Error> {
    let doc = SignDoc {
        chain_id: chain_id.to_string(),
        account_number,
        sequence,
        fee: Fee::new(fee, DEFAULT_GEN_TX_GAS),
        msgs,
        memo: String::new(),
    };
    let signature = signer.sign(&doc.sign_bytes()?);
    Ok(SignedTransaction {
        msgs: doc.msgs,
        fee: doc.fee,
        memo: doc.memo,
        signatures: vec![signature],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_sim_types::MsgBurnNft;

    #[test]
    fn test_gen_tx_signature_verifies() {
        let signer = SimAccount::from_secret([4u8; 32]);
        let msg = Request::BurnNft(MsgBurnNft {
            owner: signer.address,
            id: "1".into(),
            denom: "d".into(),
        });
        let tx = gen_tx(vec![msg], Coins::single("stake", 2), "c", 3, 9, &signer).unwrap();
        let bytes = tx.sign_doc("c", 3, 9).sign_bytes().unwrap();
        assert_eq!(tx.signatures.len(), 1);
        assert!(tx.signatures[0].verify(&bytes));
        assert_eq!(tx.signatures[0].signer_address(), signer.address);
        assert_eq!(tx.fee.gas, DEFAULT_GEN_TX_GAS);
    }

    #[test]
    fn test_gen_tx_deterministic_digest() {
        let signer = SimAccount::from_secret([4u8; 32]);
        let build = || {
            gen_tx(
                vec![Request::BurnNft(MsgBurnNft {
                    owner: signer.address,
                    id: "1".into(),
                    denom: "d".into(),
                })],
                Coins::single("stake", 2),
                "c",
                0,
                0,
                &signer,
            )
            .unwrap()
        };
        assert_eq!(build().digest().unwrap(), build().digest().unwrap());
    }
}
