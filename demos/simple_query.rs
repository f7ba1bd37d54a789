use cypher_http::{Client, ConnectionTarget};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(ConnectionTarget::from_env()?)?;

    let names = client
        .cypher(
            "MERGE (p1:Person {name: {name1}}) \
             MERGE (p2:Person {name: {name2}}) \
             CREATE UNIQUE p1-[:KNOWS]->p2 \
             RETURN p1.name, p2.name",
        )
        .params([("name1", "Mike"), ("name2", "Matt")])
        .execute()?
        .as_strings()?;

    println!("names: {names:?}");

    Ok(())
}
