use quickbuild::Builder;

#[derive(Debug, Builder)]
pub struct Contact {
    name: String,
    nickname: Option<String>,
    aliases: Vec<Option<String>>,
}

fn main() {
    let contact = Contact::builder()
        .name("Ada".to_string())
        .aliases(vec![None, Some("A".to_string())])
        .build()
        .unwrap();
    assert_eq!(contact.nickname, None);
    assert_eq!(contact.aliases, vec![None, Some("A".to_string())]);

    let contact = Contact::builder()
        .name("Ada".to_string())
        .nickname(Some("Countess".to_string()))
        .aliases(Vec::new())
        .build()
        .unwrap();
    assert_eq!(contact.nickname.as_deref(), Some("Countess"));
}
