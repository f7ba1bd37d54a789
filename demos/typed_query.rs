use cypher_http::{Client, ConnectionTarget, Node};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct Params<'a> {
    name: &'a str,
    age: u32,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Person {
    name: String,
    age: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(ConnectionTarget::from_env()?)?;

    let results = client
        .cypher("MERGE (p:Person {name: {name}}) SET p.age = {age} RETURN p, p.name, p.age")
        .params_from(&Params {
            name: "Mike",
            age: 31,
        })
        .execute()?;

    let node: Node = results.scalar()?;
    println!("node: {:?}", node.properties);

    let ages: Vec<i64> = results.column("p.age")?;
    println!("ages: {ages:?}");

    let person: Person = client
        .cypher("MATCH (p:Person {name: {name}}) RETURN {name: p.name, age: p.age}")
        .params([("name", "Mike")])
        .execute()?
        .deserialize()?;
    println!("person: {person:?}");

    Ok(())
}
