use quickbuild::{BuildError, Builder};

fn non_negative(value: &i32) -> Result<(), String> {
    if *value < 0 {
        Err(format!("{value} is negative"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Builder)]
pub struct Account {
    #[builder(validate = non_negative)]
    balance: i32,
}

fn main() {
    assert_eq!(Account::builder().balance(10).build().unwrap().balance, 10);

    let err = Account::builder().balance(-1).build().unwrap_err();
    assert_eq!(err, BuildError::invalid("balance", "-1 is negative"));
}
