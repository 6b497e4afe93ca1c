//! Shared setup for the cw-multi-test suites.
//!
//! Deploys the CCTP contract next to a cw20-base token whose minter is the
//! CCTP contract, links one remote token, and signs attestations with
//! deterministic k256 keys.

#![allow(dead_code)]

use cosmwasm_std::{Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use cctp::address_codec::{encode_bech32, local_identity};
use cctp::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, RemoteTokenMessenger};
use cctp_common::{keccak256, BurnMessage, Message};

pub const LOCAL_DOMAIN: u32 = 4;
pub const REMOTE_DOMAIN: u32 = 0;
pub const MESSAGE_VERSION: u32 = 0;
pub const BURN_MESSAGE_VERSION: u32 = 0;

pub const INITIAL_BALANCE: u128 = 1_000_000;
pub const MINTER_ALLOWANCE: u128 = 1_000_000_000;

/// Remote token messenger on REMOTE_DOMAIN (left-padded 20-byte address)
pub fn remote_token_messenger() -> [u8; 32] {
    left_pad(&hex::decode("bd3fa81b58ba92a82136038b25adec7066af3155").unwrap())
}

/// Remote USDC on REMOTE_DOMAIN (left-padded 20-byte address)
pub fn remote_token() -> [u8; 32] {
    left_pad(&hex::decode("07865c6e87b9f70255377e024ace6630c1eaa37f").unwrap())
}

pub fn left_pad(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    out
}

// ============================================================================
// Accounts
// ============================================================================

/// Valid 20-byte bech32 account whose payload is `[seed; 20]`
pub fn user(seed: u8) -> Addr {
    Addr::unchecked(encode_bech32("terra", &[seed; 20]).unwrap())
}

pub fn owner() -> Addr {
    Addr::unchecked("terra1owner")
}

pub fn attester_manager() -> Addr {
    Addr::unchecked("terra1attestermanager")
}

pub fn pauser() -> Addr {
    Addr::unchecked("terra1pauser")
}

pub fn token_controller() -> Addr {
    Addr::unchecked("terra1tokencontroller")
}

// ============================================================================
// Attester Keys
// ============================================================================

/// Deterministic attester key whose secret scalar is `seed`.
///
/// Address order of the first three keys: key 2 < key 3 < key 1.
pub fn signing_key(seed: u8) -> SigningKey {
    let mut secret = [0u8; 32];
    secret[31] = seed;
    SigningKey::from_slice(&secret).unwrap()
}

pub fn attester_address(seed: u8) -> String {
    let point = signing_key(seed).verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

pub fn sign(seed: u8, message: &[u8]) -> Vec<u8> {
    let digest = keccak256(message);
    let (signature, recovery_id) = signing_key(seed).sign_prehash_recoverable(&digest).unwrap();
    let mut out = signature.to_bytes().to_vec();
    out.push(recovery_id.to_byte() + 27);
    out
}

/// Concatenate signatures in the given order.
pub fn attest(seeds: &[u8], message: &[u8]) -> Binary {
    Binary::from(
        seeds
            .iter()
            .flat_map(|&seed| sign(seed, message))
            .collect::<Vec<u8>>(),
    )
}

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_cctp() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cctp::contract::execute,
        cctp::contract::instantiate,
        cctp::contract::query,
    )
    .with_migrate(cctp::contract::migrate);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub struct Suite {
    pub app: App,
    pub cctp_code: u64,
    pub cctp: Addr,
    pub token: Addr,
}

pub fn default_instantiate_msg(attesters: &[u8], threshold: Option<u32>) -> InstantiateMsg {
    InstantiateMsg {
        owner: owner().to_string(),
        attester_manager: Some(attester_manager().to_string()),
        pauser: Some(pauser().to_string()),
        token_controller: Some(token_controller().to_string()),
        local_domain: LOCAL_DOMAIN,
        message_version: MESSAGE_VERSION,
        burn_message_version: BURN_MESSAGE_VERSION,
        bech32_prefix: "terra".to_string(),
        attesters: attesters.iter().map(|&seed| attester_address(seed)).collect(),
        signature_threshold: threshold,
        max_message_body_size: Some(8192),
        minting_token: None,
        router: None,
        remote_token_messengers: vec![RemoteTokenMessenger {
            domain: REMOTE_DOMAIN,
            token_messenger: Binary::from(remote_token_messenger().to_vec()),
        }],
    }
}

/// Attesters 1 and 2 with a threshold of 2.
pub fn setup() -> Suite {
    setup_with(default_instantiate_msg(&[1, 2], Some(2)))
}

pub fn setup_with(msg: InstantiateMsg) -> Suite {
    let mut app = App::default();

    let cctp_code = app.store_code(contract_cctp());
    let cw20_code = app.store_code(contract_cw20());

    let cctp = app
        .instantiate_contract(cctp_code, owner(), &msg, &[], "cctp", Some(owner().to_string()))
        .unwrap();

    let token = app
        .instantiate_contract(
            cw20_code,
            owner(),
            &cw20_base::msg::InstantiateMsg {
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
                initial_balances: vec![
                    Cw20Coin {
                        address: user(1).to_string(),
                        amount: Uint128::new(INITIAL_BALANCE),
                    },
                    Cw20Coin {
                        address: user(2).to_string(),
                        amount: Uint128::new(INITIAL_BALANCE),
                    },
                ],
                mint: Some(MinterResponse {
                    minter: cctp.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "usdc",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner(),
        cctp.clone(),
        &ExecuteMsg::UpdateMintingToken {
            token: token.to_string(),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        token_controller(),
        cctp.clone(),
        &ExecuteMsg::LinkTokenPair {
            local_token: token.to_string(),
            remote_domain: REMOTE_DOMAIN,
            remote_token: Binary::from(remote_token().to_vec()),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        token_controller(),
        cctp.clone(),
        &ExecuteMsg::ConfigureMinterAllowance {
            local_token: token.to_string(),
            amount: Uint128::new(MINTER_ALLOWANCE),
        },
        &[],
    )
    .unwrap();

    Suite {
        app,
        cctp_code,
        cctp,
        token,
    }
}

// ============================================================================
// Actions
// ============================================================================

impl Suite {
    pub fn balance(&self, addr: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn total_supply(&self) -> Uint128 {
        let res: cw20::TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.cctp, msg).unwrap()
    }

    pub fn cctp_identity(&self) -> [u8; 32] {
        local_identity(&self.cctp)
    }

    pub fn approve(&mut self, depositor: &Addr, amount: u128) {
        self.app
            .execute_contract(
                depositor.clone(),
                self.token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.cctp.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn deposit_for_burn(
        &mut self,
        depositor: &Addr,
        amount: u128,
        mint_recipient: [u8; 32],
        destination_caller: Option<[u8; 32]>,
    ) -> anyhow::Result<AppResponse> {
        let msg = ExecuteMsg::DepositForBurn {
            amount: Uint128::new(amount),
            destination_domain: REMOTE_DOMAIN,
            mint_recipient: Binary::from(mint_recipient.to_vec()),
            burn_token: self.token.to_string(),
            destination_caller: destination_caller.map(|c| Binary::from(c.to_vec())),
        };
        self.app
            .execute_contract(depositor.clone(), self.cctp.clone(), &msg, &[])
    }

    /// Approve and burn in one step; panics on failure.
    pub fn approve_and_deposit(
        &mut self,
        depositor: &Addr,
        amount: u128,
        mint_recipient: [u8; 32],
    ) -> AppResponse {
        self.approve(depositor, amount);
        self.deposit_for_burn(depositor, amount, mint_recipient, None)
            .unwrap()
    }

    pub fn receive_message(
        &mut self,
        caller: &Addr,
        message: &[u8],
        attestation: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            caller.clone(),
            self.cctp.clone(),
            &ExecuteMsg::ReceiveMessage {
                message: Binary::from(message.to_vec()),
                attestation,
            },
            &[],
        )
    }

    /// Inbound envelope carrying a burn of the remote token on REMOTE_DOMAIN.
    pub fn inbound_burn(&self, nonce: u64, amount: u64, recipient: &Addr) -> Vec<u8> {
        let burn = BurnMessage {
            version: BURN_MESSAGE_VERSION,
            burn_token: remote_token(),
            mint_recipient: local_identity(recipient),
            amount,
            message_sender: [0x55; 32],
        };
        self.inbound_message(nonce, burn.encode().to_vec(), [0u8; 32])
    }

    /// Inbound envelope from the remote token messenger to this contract.
    pub fn inbound_message(
        &self,
        nonce: u64,
        message_body: Vec<u8>,
        destination_caller: [u8; 32],
    ) -> Vec<u8> {
        Message {
            version: MESSAGE_VERSION,
            source_domain: REMOTE_DOMAIN,
            destination_domain: LOCAL_DOMAIN,
            nonce,
            sender: remote_token_messenger(),
            recipient: self.cctp_identity(),
            destination_caller,
            message_body,
        }
        .encode()
    }
}

// ============================================================================
// Response Inspection
// ============================================================================

/// Value of `key` on the first `event_type` event emitted by the contract.
pub fn event_attr(res: &AppResponse, event_type: &str, key: &str) -> Option<String> {
    let wasm_type = format!("wasm-{}", event_type);
    res.events
        .iter()
        .filter(|e| e.ty == wasm_type)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn has_event(res: &AppResponse, event_type: &str) -> bool {
    let wasm_type = format!("wasm-{}", event_type);
    res.events.iter().any(|e| e.ty == wasm_type)
}

pub fn decode_hex(value: &str) -> Vec<u8> {
    hex::decode(value.trim_start_matches("0x")).unwrap()
}

/// Envelope bytes from the `message_sent` event.
pub fn sent_message(res: &AppResponse) -> Vec<u8> {
    decode_hex(&event_attr(res, "message_sent", "message").expect("message_sent event"))
}

/// Root cause of a failed execution, as displayed.
pub fn root_error(err: anyhow::Error) -> String {
    err.root_cause().to_string()
}
