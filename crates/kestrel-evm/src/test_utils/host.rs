//! An in-memory [`Host`] backed by hash maps, with the snapshot/restore semantics a
//! production journal would provide.

use crate::{
    constants::{GAS_CODE_DEPOSIT, KECCAK_EMPTY, MAX_CODE_SIZE},
    AccessStatus, BlockEnv, CallInputs, CallOutcome, CallValue, CreateInputs, CreateOutcome,
    CreateScheme, ExecutionResult, Frame, FrameInputs, Host, SpecId, TxEnv,
};
use alloy_primitives::{keccak256, Address, Bytes, Log, B256, U256};
use std::collections::{HashMap, HashSet};

/// One account of the mock world state.
#[derive(Clone, Debug, Default)]
pub struct MockAccount {
    /// Wei balance.
    pub balance: U256,
    /// Account nonce.
    pub nonce: u64,
    /// Contract code, empty for externally owned accounts.
    pub code: Bytes,
    /// Current storage.
    pub storage: HashMap<U256, U256>,
}

/// Everything [`MockHost`] rolls back when a sub-call fails.
#[derive(Clone, Debug, Default)]
struct Journal {
    accounts: HashMap<Address, MockAccount>,
    original_storage: HashMap<(Address, U256), U256>,
    transient: HashMap<(Address, U256), U256>,
    accessed_accounts: HashSet<Address>,
    accessed_slots: HashSet<(Address, U256)>,
    refund: i64,
    logs: Vec<Log>,
    selfdestructs: HashSet<Address>,
    created: HashSet<Address>,
}

/// A self-contained host for exercising frames: hash-map state, EIP-2929 access
/// lists, a log buffer and recursive sub-frame execution with full-state snapshots
/// standing in for a journal.
#[derive(Clone, Debug)]
pub struct MockHost {
    /// Active fork for this host and every frame it spawns.
    pub spec: SpecId,
    /// Block context served to environment opcodes.
    pub block: BlockEnv,
    /// Transaction context served to environment opcodes.
    pub tx: TxEnv,
    /// Historical block hashes served to `BLOCKHASH`.
    pub block_hashes: HashMap<u64, B256>,
    precompiles: HashSet<Address>,
    journal: Journal,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new(SpecId::CANCUN)
    }
}

impl MockHost {
    /// Creates an empty host under the given fork.
    pub fn new(spec: SpecId) -> Self {
        Self {
            spec,
            block: BlockEnv::default(),
            tx: TxEnv::default(),
            block_hashes: HashMap::new(),
            precompiles: HashSet::new(),
            journal: Journal::default(),
        }
    }

    /// Seeds an account's code.
    pub fn set_code(&mut self, address: Address, code: impl Into<Bytes>) {
        self.journal.accounts.entry(address).or_default().code = code.into();
    }

    /// Seeds an account's balance.
    pub fn set_balance(&mut self, address: Address, balance: U256) {
        self.journal.accounts.entry(address).or_default().balance = balance;
    }

    /// Seeds an account's nonce.
    pub fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.journal.accounts.entry(address).or_default().nonce = nonce;
    }

    /// Seeds a storage slot as pre-transaction state: it becomes both the current
    /// and the original value.
    pub fn set_storage(&mut self, address: Address, key: U256, value: U256) {
        self.journal.accounts.entry(address).or_default().storage.insert(key, value);
    }

    /// Registers a precompile address.
    pub fn set_precompile(&mut self, address: Address) {
        self.precompiles.insert(address);
    }

    /// Logs emitted so far.
    pub fn logs(&self) -> &[Log] {
        &self.journal.logs
    }

    /// Whether the account was flagged for end-of-transaction destruction.
    pub fn is_selfdestructed(&self, address: Address) -> bool {
        self.journal.selfdestructs.contains(&address)
    }

    /// Marks an account as created in this transaction (EIP-6780 scoping).
    pub fn mark_created(&mut self, address: Address) {
        self.journal.created.insert(address);
    }

    /// Runs `bytecode` in a fresh top-level frame against this host.
    pub fn run(
        &mut self,
        address: Address,
        bytecode: impl Into<Bytes>,
        gas_limit: u64,
    ) -> ExecutionResult {
        let mut frame = Frame::new(
            FrameInputs {
                address,
                bytecode: bytecode.into(),
                gas_limit,
                ..Default::default()
            },
            self.spec,
        );
        frame.run(self)
    }

    fn account(&self, address: Address) -> Option<&MockAccount> {
        self.journal.accounts.get(&address)
    }

    fn account_mut(&mut self, address: Address) -> &mut MockAccount {
        self.journal.accounts.entry(address).or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, value: U256) {
        if value.is_zero() {
            return;
        }
        let balance = self.account_mut(from).balance;
        self.account_mut(from).balance = balance - value;
        let balance = self.account_mut(to).balance;
        self.account_mut(to).balance = balance + value;
    }

    fn run_sub_frame(&mut self, inputs: FrameInputs) -> ExecutionResult {
        let mut frame = Frame::new(inputs, self.spec);
        frame.run(self)
    }
}

impl Host for MockHost {
    fn spec_id(&self) -> SpecId {
        self.spec
    }

    fn block_env(&self) -> &BlockEnv {
        &self.block
    }

    fn tx_env(&self) -> &TxEnv {
        &self.tx
    }

    fn block_hash(&mut self, number: u64) -> B256 {
        self.block_hashes.get(&number).copied().unwrap_or_default()
    }

    fn balance(&mut self, address: Address) -> U256 {
        self.account(address).map_or(U256::ZERO, |account| account.balance)
    }

    fn nonce(&mut self, address: Address) -> u64 {
        self.account(address).map_or(0, |account| account.nonce)
    }

    fn code(&mut self, address: Address) -> Bytes {
        self.account(address).map_or_else(Bytes::new, |account| account.code.clone())
    }

    fn code_hash(&mut self, address: Address) -> B256 {
        match self.account(address) {
            None => B256::ZERO,
            Some(account) if account.code.is_empty() => KECCAK_EMPTY,
            Some(account) => keccak256(&account.code),
        }
    }

    fn is_precompile(&self, address: Address, _spec: SpecId) -> bool {
        self.precompiles.contains(&address)
    }

    fn sload(&mut self, address: Address, key: U256) -> U256 {
        self.account(address)
            .and_then(|account| account.storage.get(&key))
            .copied()
            .unwrap_or_default()
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) {
        let current = self.sload(address, key);
        self.journal.original_storage.entry((address, key)).or_insert(current);
        self.account_mut(address).storage.insert(key, value);
    }

    fn original_storage(&mut self, address: Address, key: U256) -> U256 {
        if let Some(original) = self.journal.original_storage.get(&(address, key)) {
            return *original;
        }
        self.sload(address, key)
    }

    fn tload(&mut self, address: Address, key: U256) -> U256 {
        self.journal.transient.get(&(address, key)).copied().unwrap_or_default()
    }

    fn tstore(&mut self, address: Address, key: U256, value: U256) {
        self.journal.transient.insert((address, key), value);
    }

    fn access_account(&mut self, address: Address) -> AccessStatus {
        if self.journal.accessed_accounts.insert(address) {
            AccessStatus::Cold
        } else {
            AccessStatus::Warm
        }
    }

    fn access_storage_slot(&mut self, address: Address, key: U256) -> AccessStatus {
        if self.journal.accessed_slots.insert((address, key)) {
            AccessStatus::Cold
        } else {
            AccessStatus::Warm
        }
    }

    fn add_refund(&mut self, delta: i64) {
        self.journal.refund += delta;
    }

    fn refund(&self) -> i64 {
        self.journal.refund
    }

    fn log(&mut self, log: Log) {
        self.journal.logs.push(log);
    }

    fn selfdestruct(&mut self, address: Address, beneficiary: Address) -> bool {
        let balance = self.balance(address);
        self.transfer(address, beneficiary, balance);
        let destroys = self.spec.is_before(SpecId::CANCUN) || self.journal.created.contains(&address);
        if destroys {
            self.account_mut(address).balance = U256::ZERO;
            return !self.journal.selfdestructs.insert(address);
        }
        false
    }

    fn call(&mut self, inputs: CallInputs) -> CallOutcome {
        let snapshot = self.journal.clone();
        if let CallValue::Transfer(value) = inputs.value {
            self.transfer(inputs.caller, inputs.target, value);
        }
        let bytecode = self.code(inputs.code_address);
        let result = self.run_sub_frame(FrameInputs {
            address: inputs.target,
            caller: inputs.caller,
            value: inputs.value.get(),
            is_static: inputs.is_static,
            depth: inputs.depth,
            bytecode,
            input: inputs.input,
            gas_limit: inputs.gas_limit,
        });
        match result {
            ExecutionResult::Success { gas_left, output, .. } => {
                CallOutcome { success: true, gas_left, output }
            }
            ExecutionResult::Revert { gas_left, output, .. } => {
                self.journal = snapshot;
                CallOutcome { success: false, gas_left, output }
            }
            ExecutionResult::Halt { .. } => {
                self.journal = snapshot;
                CallOutcome { success: false, gas_left: 0, output: Bytes::new() }
            }
        }
    }

    fn create(&mut self, inputs: CreateInputs) -> CreateOutcome {
        let nonce = self.nonce(inputs.caller);
        let address = match inputs.scheme {
            CreateScheme::Create => inputs.caller.create(nonce),
            CreateScheme::Create2 { salt } => {
                inputs.caller.create2(salt.to_be_bytes(), keccak256(&inputs.init_code))
            }
        };
        // The creator's nonce bump survives a reverting init frame, so it sits
        // outside the snapshot.
        self.account_mut(inputs.caller).nonce = nonce + 1;
        let snapshot = self.journal.clone();

        // Address collision with an existing contract aborts before running init
        // code.
        let occupied = self
            .account(address)
            .is_some_and(|account| account.nonce != 0 || !account.code.is_empty());
        if occupied {
            return CreateOutcome {
                success: false,
                gas_left: 0,
                output: Bytes::new(),
                address: None,
            };
        }

        self.journal.created.insert(address);
        if self.spec.is_enabled(SpecId::SPURIOUS_DRAGON) {
            self.account_mut(address).nonce = 1;
        }
        self.transfer(inputs.caller, address, inputs.value);

        let result = self.run_sub_frame(FrameInputs {
            address,
            caller: inputs.caller,
            value: inputs.value,
            is_static: false,
            depth: inputs.depth,
            bytecode: inputs.init_code,
            input: Bytes::new(),
            gas_limit: inputs.gas_limit,
        });
        match result {
            ExecutionResult::Success { mut gas_left, output, .. } => {
                let deposit = GAS_CODE_DEPOSIT * output.len() as u64;
                let oversized =
                    self.spec.is_enabled(SpecId::SPURIOUS_DRAGON) && output.len() > MAX_CODE_SIZE;
                if oversized || gas_left < deposit {
                    self.journal = snapshot;
                    return CreateOutcome {
                        success: false,
                        gas_left: 0,
                        output: Bytes::new(),
                        address: None,
                    };
                }
                gas_left -= deposit;
                self.account_mut(address).code = output;
                CreateOutcome { success: true, gas_left, output: Bytes::new(), address: Some(address) }
            }
            ExecutionResult::Revert { gas_left, output, .. } => {
                self.journal = snapshot;
                CreateOutcome { success: false, gas_left, output, address: None }
            }
            ExecutionResult::Halt { .. } => {
                self.journal = snapshot;
                CreateOutcome { success: false, gas_left: 0, output: Bytes::new(), address: None }
            }
        }
    }
}
