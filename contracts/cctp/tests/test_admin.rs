//! Roles, pause switches, attester management, token controller operations,
//! instantiation and migration.

mod support;

use cosmwasm_std::{Addr, Binary, Uint128};
use cw_multi_test::{App, AppResponse, Executor};

use cctp::msg::{
    AttestersResponse, BurnLimitResponse, ExecuteMsg, InstantiateMsg, LocalIdentityResponse,
    MaxMessageBodySizeResponse, MigrateMsg, PausedResponse, PendingOwnerResponse, QueryMsg,
    RemoteTokenMessenger, RemoteTokenMessengerResponse, RemoteTokenMessengersResponse,
    RolesResponse, SignatureThresholdResponse, TokenPairResponse, TokenPairsResponse,
};
use cctp::ContractError;

use support::*;

fn exec(suite: &mut Suite, sender: Addr, msg: ExecuteMsg) -> anyhow::Result<AppResponse> {
    let cctp = suite.cctp.clone();
    suite.app.execute_contract(sender, cctp, &msg, &[])
}

fn instantiate_err(msg: InstantiateMsg) -> String {
    let mut app = App::default();
    let code = app.store_code(contract_cctp());
    let err = app
        .instantiate_contract(code, owner(), &msg, &[], "cctp", None)
        .unwrap_err();
    root_error(err)
}

fn send_message(suite: &mut Suite, body: Vec<u8>) -> anyhow::Result<AppResponse> {
    exec(
        suite,
        user(1),
        ExecuteMsg::SendMessage {
            destination_domain: REMOTE_DOMAIN,
            recipient: Binary::from(vec![0x11u8; 32]),
            message_body: Binary::from(body),
        },
    )
}

// ============================================================================
// Ownership & Roles
// ============================================================================

#[test]
fn test_two_step_ownership_transfer() {
    let mut suite = setup();
    let new_owner = Addr::unchecked("terra1newowner");

    let err = exec(
        &mut suite,
        user(1),
        ExecuteMsg::UpdateOwner {
            new_owner: user(1).to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(root_error(err), ContractError::Unauthorized.to_string());

    let err = exec(&mut suite, new_owner.clone(), ExecuteMsg::AcceptOwner {}).unwrap_err();
    assert_eq!(root_error(err), ContractError::NoPendingOwner.to_string());

    exec(
        &mut suite,
        owner(),
        ExecuteMsg::UpdateOwner {
            new_owner: new_owner.to_string(),
        },
    )
    .unwrap();

    let pending: PendingOwnerResponse = suite.query(&QueryMsg::PendingOwner {});
    assert_eq!(pending.pending_owner, Some(new_owner.clone()));

    // Proposal alone changes nothing
    let roles: RolesResponse = suite.query(&QueryMsg::Roles {});
    assert_eq!(roles.owner, owner());

    let err = exec(&mut suite, user(1), ExecuteMsg::AcceptOwner {}).unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::UnauthorizedPendingOwner.to_string()
    );

    exec(&mut suite, new_owner.clone(), ExecuteMsg::AcceptOwner {}).unwrap();

    let roles: RolesResponse = suite.query(&QueryMsg::Roles {});
    assert_eq!(roles.owner, new_owner);
    let pending: PendingOwnerResponse = suite.query(&QueryMsg::PendingOwner {});
    assert_eq!(pending.pending_owner, None);

    // Old owner lost its rights
    let err = exec(&mut suite, owner(), ExecuteMsg::UpdateRouter { router: None }).unwrap_err();
    assert_eq!(root_error(err), ContractError::Unauthorized.to_string());
    exec(&mut suite, new_owner, ExecuteMsg::UpdateRouter { router: None }).unwrap();
}

#[test]
fn test_role_updates() {
    let mut suite = setup();
    let new_pauser = Addr::unchecked("terra1newpauser");
    let new_manager = Addr::unchecked("terra1newmanager");
    let new_controller = Addr::unchecked("terra1newcontroller");

    let err = exec(
        &mut suite,
        pauser(),
        ExecuteMsg::UpdatePauser {
            new_pauser: new_pauser.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(root_error(err), ContractError::Unauthorized.to_string());

    exec(
        &mut suite,
        owner(),
        ExecuteMsg::UpdatePauser {
            new_pauser: new_pauser.to_string(),
        },
    )
    .unwrap();
    exec(
        &mut suite,
        owner(),
        ExecuteMsg::UpdateAttesterManager {
            new_attester_manager: new_manager.to_string(),
        },
    )
    .unwrap();
    exec(
        &mut suite,
        owner(),
        ExecuteMsg::UpdateTokenController {
            new_token_controller: new_controller.to_string(),
        },
    )
    .unwrap();

    let roles: RolesResponse = suite.query(&QueryMsg::Roles {});
    assert_eq!(roles.pauser, new_pauser);
    assert_eq!(roles.attester_manager, new_manager);
    assert_eq!(roles.token_controller, new_controller);

    let err = exec(&mut suite, pauser(), ExecuteMsg::PauseBurningAndMinting {}).unwrap_err();
    assert_eq!(root_error(err), ContractError::UnauthorizedPauser.to_string());
    exec(&mut suite, new_pauser, ExecuteMsg::PauseBurningAndMinting {}).unwrap();

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::UpdateSignatureThreshold { threshold: 1 },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::UnauthorizedAttesterManager.to_string()
    );
    exec(
        &mut suite,
        new_manager,
        ExecuteMsg::UpdateSignatureThreshold { threshold: 1 },
    )
    .unwrap();
}

// ============================================================================
// Pause Switches
// ============================================================================

#[test]
fn test_pause_burning_and_minting() {
    let mut suite = setup();
    suite.approve(&user(1), 10_000);

    let err = exec(&mut suite, user(1), ExecuteMsg::PauseBurningAndMinting {}).unwrap_err();
    assert_eq!(root_error(err), ContractError::UnauthorizedPauser.to_string());

    exec(&mut suite, pauser(), ExecuteMsg::PauseBurningAndMinting {}).unwrap();
    let paused: PausedResponse = suite.query(&QueryMsg::Paused {});
    assert!(paused.burning_and_minting);
    assert!(!paused.sending_and_receiving);

    let err = suite
        .deposit_for_burn(&user(1), 100, [0x42; 32], None)
        .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::BurningAndMintingPaused.to_string()
    );

    let message = suite.inbound_burn(1, 100, &user(3));
    let err = suite
        .receive_message(&user(9), &message, attest(&[2, 1], &message))
        .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::BurningAndMintingPaused.to_string()
    );

    // Raw messages still flow
    send_message(&mut suite, b"ping".to_vec()).unwrap();

    exec(&mut suite, pauser(), ExecuteMsg::UnpauseBurningAndMinting {}).unwrap();
    suite
        .deposit_for_burn(&user(1), 100, [0x42; 32], None)
        .unwrap();
    suite
        .receive_message(&user(9), &message, attest(&[2, 1], &message))
        .unwrap();
    assert_eq!(suite.balance(&user(3)), Uint128::new(100));
}

#[test]
fn test_pause_sending_and_receiving() {
    let mut suite = setup();
    suite.approve(&user(1), 10_000);

    exec(&mut suite, pauser(), ExecuteMsg::PauseSendingAndReceiving {}).unwrap();
    let paused: PausedResponse = suite.query(&QueryMsg::Paused {});
    assert!(!paused.burning_and_minting);
    assert!(paused.sending_and_receiving);

    let err = send_message(&mut suite, b"ping".to_vec()).unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::SendingAndReceivingPaused.to_string()
    );

    let err = suite
        .deposit_for_burn(&user(1), 100, [0x42; 32], None)
        .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::SendingAndReceivingPaused.to_string()
    );

    let message = suite.inbound_burn(1, 100, &user(3));
    let err = suite
        .receive_message(&user(9), &message, attest(&[2, 1], &message))
        .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::SendingAndReceivingPaused.to_string()
    );

    exec(&mut suite, pauser(), ExecuteMsg::UnpauseSendingAndReceiving {}).unwrap();
    send_message(&mut suite, b"ping".to_vec()).unwrap();
    suite
        .receive_message(&user(9), &message, attest(&[2, 1], &message))
        .unwrap();
}

// ============================================================================
// Attester Management
// ============================================================================

#[test]
fn test_enable_attester_errors() {
    let mut suite = setup();

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::EnableAttester {
            attester: attester_address(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::AttesterAlreadyEnabled {
            attester: attester_address(1)
        }
        .to_string()
    );

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::EnableAttester {
            attester: "0x1234".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::InvalidAddress {
            reason: "Invalid attester length: expected 40 hex chars, got 4".to_string()
        }
        .to_string()
    );

    let res = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::EnableAttester {
            attester: attester_address(3).to_uppercase().replace("0X", "0x"),
        },
    )
    .unwrap();
    assert!(res.events.iter().any(|e| e
        .attributes
        .iter()
        .any(|a| a.key == "attester_count" && a.value == "3")));

    let attesters: AttestersResponse = suite.query(&QueryMsg::Attesters {});
    assert_eq!(attesters.attesters[2], attester_address(3));
}

#[test]
fn test_disable_attester_errors() {
    let mut suite = setup();

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::DisableAttester {
            attester: attester_address(3),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::AttesterNotFound {
            attester: attester_address(3)
        }
        .to_string()
    );

    // Two attesters at threshold 2
    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::DisableAttester {
            attester: attester_address(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::AttesterCountBelowThreshold {
            remaining: 1,
            threshold: 2
        }
        .to_string()
    );

    let err = exec(
        &mut suite,
        user(1),
        ExecuteMsg::DisableAttester {
            attester: attester_address(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::UnauthorizedAttesterManager.to_string()
    );
}

#[test]
fn test_cannot_disable_last_attester() {
    let mut suite = setup_with(default_instantiate_msg(&[1], Some(1)));

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::DisableAttester {
            attester: attester_address(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::CannotDisableLastAttester.to_string()
    );
}

#[test]
fn test_disable_attester_keeps_order() {
    let mut suite = setup_with(default_instantiate_msg(&[1, 2, 3], Some(1)));

    exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::DisableAttester {
            attester: attester_address(2),
        },
    )
    .unwrap();

    let attesters: AttestersResponse = suite.query(&QueryMsg::Attesters {});
    assert_eq!(
        attesters.attesters,
        vec![attester_address(1), attester_address(3)]
    );
}

#[test]
fn test_update_signature_threshold_errors() {
    let mut suite = setup();

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::UpdateSignatureThreshold { threshold: 0 },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::InvalidThreshold {
            reason: "threshold must be greater than zero".to_string()
        }
        .to_string()
    );

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::UpdateSignatureThreshold { threshold: 3 },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::InvalidThreshold {
            reason: "threshold 3 exceeds attester count 2".to_string()
        }
        .to_string()
    );

    let err = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::UpdateSignatureThreshold { threshold: 2 },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::ThresholdUnchanged { threshold: 2 }.to_string()
    );

    let res = exec(
        &mut suite,
        attester_manager(),
        ExecuteMsg::UpdateSignatureThreshold { threshold: 1 },
    )
    .unwrap();
    assert!(res.events.iter().any(|e| e
        .attributes
        .iter()
        .any(|a| a.key == "old_threshold" && a.value == "2")));

    let threshold: SignatureThresholdResponse = suite.query(&QueryMsg::SignatureThreshold {});
    assert_eq!(threshold.threshold, 1);
}

// ============================================================================
// Token Controller
// ============================================================================

#[test]
fn test_link_and_unlink_token_pair() {
    let mut suite = setup();
    let token = suite.token.to_string();

    let err = exec(
        &mut suite,
        owner(),
        ExecuteMsg::LinkTokenPair {
            local_token: token.clone(),
            remote_domain: 1,
            remote_token: Binary::from(vec![0x01u8; 32]),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::UnauthorizedTokenController.to_string()
    );

    let err = exec(
        &mut suite,
        token_controller(),
        ExecuteMsg::LinkTokenPair {
            local_token: token.clone(),
            remote_domain: REMOTE_DOMAIN,
            remote_token: Binary::from(remote_token().to_vec()),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::TokenPairAlreadyLinked {
            remote_domain: REMOTE_DOMAIN,
            remote_token: format!("0x{}", hex::encode(remote_token())),
        }
        .to_string()
    );

    exec(
        &mut suite,
        token_controller(),
        ExecuteMsg::UnlinkTokenPair {
            remote_domain: REMOTE_DOMAIN,
            remote_token: Binary::from(remote_token().to_vec()),
        },
    )
    .unwrap();

    let pair: TokenPairResponse = suite.query(&QueryMsg::TokenPair {
        remote_domain: REMOTE_DOMAIN,
        remote_token: Binary::from(remote_token().to_vec()),
    });
    assert_eq!(pair.local_token, None);

    let err = exec(
        &mut suite,
        token_controller(),
        ExecuteMsg::UnlinkTokenPair {
            remote_domain: REMOTE_DOMAIN,
            remote_token: Binary::from(remote_token().to_vec()),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::NoTokenPair {
            remote_domain: REMOTE_DOMAIN,
            remote_token: format!("0x{}", hex::encode(remote_token())),
        }
        .to_string()
    );

    // Inbound burns of the unlinked token can no longer mint
    let message = suite.inbound_burn(1, 100, &user(3));
    let err = suite
        .receive_message(&user(9), &message, attest(&[2, 1], &message))
        .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::NoTokenPair {
            remote_domain: REMOTE_DOMAIN,
            remote_token: format!("0x{}", hex::encode(remote_token())),
        }
        .to_string()
    );
}

#[test]
fn test_token_pairs_pagination() {
    let mut suite = setup();
    let token = suite.token.to_string();

    for (domain, seed) in [(1u32, 0x01u8), (1, 0x02), (2, 0x01)] {
        exec(
            &mut suite,
            token_controller(),
            ExecuteMsg::LinkTokenPair {
                local_token: token.clone(),
                remote_domain: domain,
                remote_token: Binary::from(vec![seed; 32]),
            },
        )
        .unwrap();
    }

    let page: TokenPairsResponse = suite.query(&QueryMsg::TokenPairs {
        start_after: None,
        limit: Some(2),
    });
    assert_eq!(page.pairs.len(), 2);
    assert_eq!(page.pairs[0].remote_domain, REMOTE_DOMAIN);
    assert_eq!(page.pairs[0].remote_token.as_slice(), remote_token());
    assert_eq!(page.pairs[1].remote_domain, 1);
    assert_eq!(page.pairs[1].remote_token.as_slice(), [0x01u8; 32]);

    let last = page.pairs.last().unwrap();
    let page: TokenPairsResponse = suite.query(&QueryMsg::TokenPairs {
        start_after: Some((last.remote_domain, last.remote_token.clone())),
        limit: None,
    });
    assert_eq!(page.pairs.len(), 2);
    assert_eq!(page.pairs[0].remote_domain, 1);
    assert_eq!(page.pairs[0].remote_token.as_slice(), [0x02u8; 32]);
    assert_eq!(page.pairs[1].remote_domain, 2);
    assert!(page
        .pairs
        .iter()
        .all(|p| p.local_token == Some(suite.token.clone())));
}

#[test]
fn test_burn_limit_and_allowance_queries() {
    let mut suite = setup();
    let token = suite.token.to_string();

    let limit: BurnLimitResponse = suite.query(&QueryMsg::PerMessageBurnLimit {
        token: token.clone(),
    });
    assert_eq!(limit.limit, None);

    exec(
        &mut suite,
        token_controller(),
        ExecuteMsg::SetMaxBurnAmountPerMessage {
            local_token: token.clone(),
            amount: Uint128::new(1_000),
        },
    )
    .unwrap();

    let limit: BurnLimitResponse = suite.query(&QueryMsg::PerMessageBurnLimit {
        token: token.clone(),
    });
    assert_eq!(limit.limit, Some(Uint128::new(1_000)));

    let err = exec(
        &mut suite,
        user(1),
        ExecuteMsg::ConfigureMinterAllowance {
            local_token: token,
            amount: Uint128::new(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::UnauthorizedTokenController.to_string()
    );
}

// ============================================================================
// Owner Settings
// ============================================================================

#[test]
fn test_update_max_message_body_size() {
    let mut suite = setup();

    let err = send_message(&mut suite, vec![0u8; 10_000]).unwrap_err();
    assert_eq!(
        root_error(err),
        ContractError::MessageBodyTooLarge {
            size: 10_000,
            max: 8192
        }
        .to_string()
    );

    let err = exec(
        &mut suite,
        user(1),
        ExecuteMsg::UpdateMaxMessageBodySize {
            max_message_body_size: None,
        },
    )
    .unwrap_err();
    assert_eq!(root_error(err), ContractError::Unauthorized.to_string());

    exec(
        &mut suite,
        owner(),
        ExecuteMsg::UpdateMaxMessageBodySize {
            max_message_body_size: None,
        },
    )
    .unwrap();

    let res: MaxMessageBodySizeResponse = suite.query(&QueryMsg::MaxMessageBodySize {});
    assert_eq!(res.max_message_body_size, None);
    send_message(&mut suite, vec![0u8; 10_000]).unwrap();
}

#[test]
fn test_local_identity_query() {
    let suite = setup();

    let res: LocalIdentityResponse = suite.query(&QueryMsg::LocalIdentity {
        address: user(3).to_string(),
    });
    assert_eq!(res.identity.as_slice(), left_pad(&[3u8; 20]));
}

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[test]
fn test_instantiate_defaults() {
    let mut msg = default_instantiate_msg(&[1, 2], None);
    msg.attester_manager = None;
    msg.pauser = None;
    msg.token_controller = None;

    let mut app = App::default();
    let code = app.store_code(contract_cctp());
    let cctp = app
        .instantiate_contract(code, owner(), &msg, &[], "cctp", None)
        .unwrap();

    let roles: RolesResponse = app
        .wrap()
        .query_wasm_smart(&cctp, &QueryMsg::Roles {})
        .unwrap();
    assert_eq!(roles.attester_manager, owner());
    assert_eq!(roles.pauser, owner());
    assert_eq!(roles.token_controller, owner());

    // One signature is required when attesters are given without a threshold
    let threshold: SignatureThresholdResponse = app
        .wrap()
        .query_wasm_smart(&cctp, &QueryMsg::SignatureThreshold {})
        .unwrap();
    assert_eq!(threshold.threshold, 1);
}

#[test]
fn test_instantiate_validation() {
    let mut msg = default_instantiate_msg(&[1, 2], Some(2));
    msg.bech32_prefix = String::new();
    assert_eq!(
        instantiate_err(msg),
        ContractError::InvalidAddress {
            reason: "bech32 prefix must not be empty".to_string()
        }
        .to_string()
    );

    let msg = default_instantiate_msg(&[1, 1], Some(1));
    assert_eq!(
        instantiate_err(msg),
        ContractError::AttesterAlreadyEnabled {
            attester: attester_address(1)
        }
        .to_string()
    );

    let msg = default_instantiate_msg(&[1, 2], Some(3));
    assert_eq!(
        instantiate_err(msg),
        ContractError::InvalidThreshold {
            reason: "threshold 3 must be between 1 and attester count 2".to_string()
        }
        .to_string()
    );

    let mut msg = default_instantiate_msg(&[1, 2], Some(2));
    msg.remote_token_messengers = vec![RemoteTokenMessenger {
        domain: 0,
        token_messenger: Binary::from(vec![0u8; 32]),
    }];
    assert_eq!(
        instantiate_err(msg),
        ContractError::InvalidAddress {
            reason: "token messenger for domain 0 must be nonzero".to_string()
        }
        .to_string()
    );

    let mut msg = default_instantiate_msg(&[1, 2], Some(2));
    msg.remote_token_messengers = vec![RemoteTokenMessenger {
        domain: 0,
        token_messenger: Binary::from(vec![0x01u8; 20]),
    }];
    assert_eq!(
        instantiate_err(msg),
        ContractError::InvalidBytes32 {
            field: "token_messenger".to_string(),
            got: 20
        }
        .to_string()
    );
}

#[test]
fn test_migrate_adds_remote_token_messenger() {
    let mut suite = setup();
    let messenger = left_pad(&[0x66u8; 20]);

    let cctp = suite.cctp.clone();
    let code = suite.cctp_code;
    suite
        .app
        .migrate_contract(
            owner(),
            cctp,
            &MigrateMsg {
                remote_token_messengers: Some(vec![RemoteTokenMessenger {
                    domain: 7,
                    token_messenger: Binary::from(messenger.to_vec()),
                }]),
            },
            code,
        )
        .unwrap();

    let res: RemoteTokenMessengerResponse =
        suite.query(&QueryMsg::RemoteTokenMessenger { domain: 7 });
    assert_eq!(res.token_messenger, Some(Binary::from(messenger.to_vec())));

    let all: RemoteTokenMessengersResponse = suite.query(&QueryMsg::RemoteTokenMessengers {
        start_after: None,
        limit: None,
    });
    let domains: Vec<u32> = all
        .remote_token_messengers
        .iter()
        .map(|m| m.domain)
        .collect();
    assert_eq!(domains, vec![REMOTE_DOMAIN, 7]);

    // Burns toward the new domain are now accepted
    suite.approve(&user(1), 100);
    let token = suite.token.to_string();
    let res = exec(
        &mut suite,
        user(1),
        ExecuteMsg::DepositForBurn {
            amount: Uint128::new(100),
            destination_domain: 7,
            mint_recipient: Binary::from(vec![0x42u8; 32]),
            burn_token: token,
            destination_caller: None,
        },
    )
    .unwrap();
    let envelope = cctp_common::Message::decode(&sent_message(&res)).unwrap();
    assert_eq!(envelope.destination_domain, 7);
    assert_eq!(envelope.recipient, messenger);

    let all: RemoteTokenMessengersResponse = suite.query(&QueryMsg::RemoteTokenMessengers {
        start_after: Some(REMOTE_DOMAIN),
        limit: Some(1),
    });
    assert_eq!(all.remote_token_messengers.len(), 1);
    assert_eq!(all.remote_token_messengers[0].domain, 7);
}
