#[derive(Debug, Clone)]
pub enum Message {
    OpenWithdraw,
    Withdraw(WithdrawMessage),
}

#[derive(Debug, Clone)]
pub enum WithdrawMessage {
    Close,
    AmountEdited(String),
    UseMax,
    Continue,
    ChangeBankAccount,
    AddBankAccount,
    SelectBankTransfer,
    SelectBeneficiary(String),
    Back,
    Confirm,
}
