use rand::Rng;

#[derive(serde::Serialize)]
pub struct Context {
    pub title: String,
    pub users: Vec<User>,
}

#[derive(serde::Serialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    pub is_disabled: bool,
}

pub fn random(n: usize) -> Context {
    let mut rng = rand::thread_rng();
    let title = (0..20).map(|_| rng.gen_range('a'..='z')).collect();
    let users = (0..n)
        .map(|_| User {
            name: (0..20).map(|_| rng.gen_range('a'..='z')).collect(),
            age: rng.gen_range(21..100),
            is_disabled: rng.gen_ratio(1, 4),
        })
        .collect();
    Context { title, users }
}

pub fn fixed() -> Context {
    let user = |name: &str, age, is_disabled| User {
        name: name.to_owned(),
        age,
        is_disabled,
    };
    Context {
        title: "My awesome webpage!".to_owned(),
        users: vec![
            user("Nancy Wheeler", 17, false),
            user("Steve Harrington", 18, false),
            user("Billy Hargrove", 19, true),
        ],
    }
}
