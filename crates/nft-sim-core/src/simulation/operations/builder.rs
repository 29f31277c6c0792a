//! Turns a sampled subject into a request.
//!
//! Free-form fields (new ids, denoms and token URIs) are random strings drawn
//! from the same source, so equal source state yields equal requests. No
//! semantic checks happen here; the ledger rejects what it must.

use nft_sim_types::{MsgBurnNft, MsgEditNftMetadata, MsgMintNft, MsgTransferNft, Request};
use rand::Rng;

use super::Subject;
use crate::simulation::rand_util::{
    rand_string_of_length, DENOM_LENGTH, NFT_ID_LENGTH, TOKEN_URI_LENGTH,
};

pub fn build_request<R: Rng + ?Sized>(rng: &mut R, subject: &Subject) -> Request {
    match subject {
        Subject::Transfer { nft, recipient } => Request::TransferNft(MsgTransferNft {
            sender: nft.owner,
            recipient: *recipient,
            denom: nft.denom.clone(),
            id: nft.id.clone(),
        }),
        Subject::EditMetadata(nft) => Request::EditNftMetadata(MsgEditNftMetadata {
            owner: nft.owner,
            id: nft.id.clone(),
            denom: nft.denom.clone(),
            token_uri: rand_string_of_length(rng, TOKEN_URI_LENGTH),
        }),
        Subject::Mint { sender, recipient } => {
            // Field order fixes the draw order: id, denom, then URI.
            let id = rand_string_of_length(rng, NFT_ID_LENGTH);
            let denom = rand_string_of_length(rng, DENOM_LENGTH);
            let token_uri = rand_string_of_length(rng, TOKEN_URI_LENGTH);
            Request::MintNft(MsgMintNft {
                sender: *sender,
                recipient: *recipient,
                id,
                denom,
                token_uri,
            })
        }
        Subject::Burn(nft) => Request::BurnNft(MsgBurnNft {
            owner: nft.owner,
            id: nft.id.clone(),
            denom: nft.denom.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_sim_types::{Address, NftRef};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mint_fields_have_expected_lengths() {
        let a: Address = "0xa".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let request = build_request(
            &mut rng,
            &Subject::Mint {
                sender: a,
                recipient: a,
            },
        );
        match request {
            Request::MintNft(msg) => {
                assert_eq!(msg.id.len(), NFT_ID_LENGTH);
                assert_eq!(msg.denom.len(), DENOM_LENGTH);
                assert_eq!(msg.token_uri.len(), TOKEN_URI_LENGTH);
                assert_eq!(msg.sender, a);
            }
            other => panic!("expected mint, got {:?}", other),
        }
    }

    #[test]
    fn test_same_seed_same_request() {
        let nft = NftRef::new("0xa".parse().unwrap(), "d", "i");
        let subject = Subject::EditMetadata(nft);
        let a = build_request(&mut StdRng::seed_from_u64(8), &subject);
        let b = build_request(&mut StdRng::seed_from_u64(8), &subject);
        assert_eq!(a, b);
    }

    #[test]
    fn test_burn_consumes_no_randomness() {
        use rand::RngCore;
        let nft = NftRef::new("0xa".parse().unwrap(), "d", "i");
        let mut rng = StdRng::seed_from_u64(8);
        build_request(&mut rng, &Subject::Burn(nft));
        assert_eq!(rng.next_u64(), StdRng::seed_from_u64(8).next_u64());
    }
}
