use tempfile::TempDir;
use testmatch::adapters::{self, dump_json, TeamRoles};
use testmatch::Team;

const SQUAD_CSV: &str = "\
first_name,last_name,initials,innings,bat_avg,bat_sr,balls_bowled,bowl_avg,bowl_sr,bowl_econ,bat_arm,bowl_arm,bowl_type
David,Warner,DA,155,45.6,70.2,54,67.0,114.0,3.5,left,right,lb
Usman,Khawaja,UT,101,47.5,48.3,30,90.0,180.0,3.0,left,right,m
Marnus,Labuschagne,M,23,63.43,56.52,756,38.66,63.0,3.68,right,right,lb
Steve,Smith,SPD,170,58.9,54.1,1812,56.4,99.0,3.4,right,right,lb
Travis,Head,TM,80,43.1,65.0,804,47.1,84.0,3.4,left,right,ob
Cameron,Green,C,40,36.2,55.0,2106,32.1,61.0,3.2,right,right,fm
Alex,Carey,AT,44,33.4,52.0,0,0.0,0.0,0.0,left,right,m
Pat,Cummins,PJ,90,16.5,41.0,12558,21.8,47.0,2.8,right,right,f
Mitchell,Starc,MA,140,14.2,48.0,15900,27.7,50.0,3.3,left,left,f
Nathan,Lyon,NM,180,12.1,40.0,28100,31.2,64.0,2.9,right,right,ob
Josh,Hazlewood,JR,110,10.9,35.0,13200,24.9,53.0,2.8,left,right,fm
";

fn roles() -> TeamRoles {
    TeamRoles {
        captain: 7,
        wicket_keeper: 6,
        opening_bowlers: (7, 8),
    }
}

#[test]
fn csv_team_matches_the_json_team() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("australia.csv");
    std::fs::write(&csv_path, SQUAD_CSV).unwrap();

    let from_csv = adapters::read_team_csv("Australia", &csv_path, roles()).unwrap();
    assert_eq!(from_csv.players().len(), 11);
    assert_eq!(from_csv.captain().last_name(), "Cummins");
    assert_eq!(from_csv.wicket_keeper().last_name(), "Carey");

    // The same XI through the JSON adapter is the same team.
    let json_path = dir.path().join("australia.json");
    dump_json(&from_csv, &json_path).unwrap();
    let from_json: Team = adapters::load_team(&json_path).unwrap();
    assert_eq!(from_csv, from_json);
}

#[test]
fn csv_row_order_is_batting_order() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("australia.csv");
    std::fs::write(&csv_path, SQUAD_CSV).unwrap();

    let players = adapters::read_players_csv(&csv_path).unwrap();
    assert_eq!(players[0].full_initials(), "DA Warner");
    assert_eq!(players[2].full_name(), "Marnus Labuschagne");
    assert_eq!(players[10].full_initials(), "JR Hazlewood");
}

#[test]
fn csv_team_with_bad_roles_is_rejected() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("australia.csv");
    std::fs::write(&csv_path, SQUAD_CSV).unwrap();

    let bad = TeamRoles {
        captain: 0,
        wicket_keeper: 6,
        opening_bowlers: (8, 8),
    };
    assert!(adapters::read_team_csv("Australia", &csv_path, bad).is_err());
}
