use quickbuild::property;

#[property(iterations = 20, seed = 7)]
fn reverse_twice(values: Vec<i32>) {
    let mut reversed = values.clone();
    reversed.reverse();
    reversed.reverse();
    assert_eq!(reversed, values);
}

#[property]
fn returns_result(a: u8, b: u8) -> Result<(), String> {
    if u16::from(a) + u16::from(b) <= 510 {
        Ok(())
    } else {
        Err("sum overflowed".to_string())
    }
}

fn main() {
    __reverse_twice_property(vec![1, 2, 3]);
    assert_eq!(__returns_result_property(1, 2), Ok(()));
}
